//! Text and JSON views of an [`AnalysisSummary`].
use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::ir::{AnalysisSummary, FunctionReport};

const INDENT: &str = "    ";

/// One analyzed input, as emitted by the `json` command.
#[derive(Debug, Serialize)]
pub struct SourceSummary<'a> {
    pub source: String,
    pub summary: &'a AnalysisSummary,
}

pub fn render_function(out: &mut String, func: &FunctionReport) {
    let _ = writeln!(out, "Function: {}", func.name);
    let _ = writeln!(out, "Return Type: {}", func.return_type);
    out.push_str("Parameters:\n");
    if func.parameters.is_empty() {
        let _ = writeln!(out, "{INDENT}None");
    }
    for param in &func.parameters {
        let _ = writeln!(out, "{INDENT}{} {}", param.ty, param.name);
    }
    if let Some(count) = func.conditional_count {
        let _ = writeln!(out, "if-condition count: {count}");
    }
    out.push('\n');
}

pub fn render_text(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    for func in &summary.functions {
        render_function(&mut out, func);
    }
    let _ = writeln!(out, "Total number of functions: {}", summary.total_count);
    out
}

/// Several inputs: one `== <path>` section per document.
pub fn render_text_many<P: AsRef<Path>>(summaries: &[(P, AnalysisSummary)]) -> String {
    if let [(_, only)] = summaries {
        return render_text(only);
    }
    let mut out = String::new();
    for (i, (path, summary)) in summaries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "== {}", path.as_ref().display());
        out.push_str(&render_text(summary));
    }
    out
}

pub fn render_json_many<P: AsRef<Path>>(summaries: &[(P, AnalysisSummary)]) -> serde_json::Result<String> {
    if let [(_, only)] = summaries {
        return serde_json::to_string_pretty(only);
    }
    let entries: Vec<SourceSummary<'_>> = summaries
        .iter()
        .map(|(path, summary)| SourceSummary { source: path.as_ref().display().to_string(), summary })
        .collect();
    serde_json::to_string_pretty(&entries)
}
