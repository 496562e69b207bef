//! Analyze every `testdata/*.ast.json` and compare against its
//! `*.expected.json` sibling, and against `*.expected.c` when one exists.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

use ast_summary::path_de::from_str_with_path;
use ast_summary::AnalysisSummary;

static FIXTURE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<stem>.+)\.ast\.json$").unwrap());

fn testdata_dir() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("testdata"))
}

fn check(ast_path: &Path, expected_path: &Path) -> Result<(), String> {
    let source = std::fs::read_to_string(ast_path).map_err(|e| format!("read: {e}"))?;
    let document = serde_json::from_str::<serde_json::Value>(&source).map_err(|e| format!("parse: {e}"))?;
    let actual = ast_summary::analyze(&document).map_err(|e| e.to_string())?;

    let expected_src = std::fs::read_to_string(expected_path).map_err(|e| format!("read expected: {e}"))?;
    let expected = from_str_with_path::<AnalysisSummary>(&expected_src)
        .map_err(|e| format!("expected fixture at {}: {}", e.path(), e.inner()))?;
    if actual != expected {
        let actual = serde_json::to_string_pretty(&actual).unwrap_or_default();
        return Err(format!("summary mismatch, got:\n{actual}"));
    }

    let expected_c_path = expected_path.with_extension("c");
    if expected_c_path.exists() {
        let expected_c = std::fs::read_to_string(&expected_c_path).map_err(|e| format!("read expected C: {e}"))?;
        let actual_c = ast_summary::codegen::generate_c(&document);
        if actual_c != expected_c {
            return Err(format!("C source mismatch, got:\n{actual_c}"));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let dir = testdata_dir();
    let pattern = dir.join("*.ast.json");
    let entries = match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths.filter_map(Result::ok).collect::<Vec<_>>(),
        Err(error) => {
            eprintln!("{} bad fixture pattern: {error}", "❌".red());
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    for ast_path in &entries {
        let file_name = ast_path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let Some(stem) = FIXTURE_NAME.captures(&file_name).map(|c| c["stem"].to_string()) else {
            continue;
        };
        let expected_path = ast_path.with_file_name(format!("{stem}.expected.json"));
        match check(ast_path, &expected_path) {
            Ok(()) => eprintln!("✅ {stem}"),
            Err(error) => {
                failures += 1;
                eprintln!("❌ {}: {error}", stem.red());
            }
        }
    }

    eprintln!("{} fixtures, {} failed", entries.len(), failures);
    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
