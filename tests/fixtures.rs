//! End-to-end checks over the documents in `testdata/`.

use std::path::{Path, PathBuf};

use ast_summary::cli::load_document;
use ast_summary::path_de::from_str_with_path;
use ast_summary::render::render_text;
use ast_summary::{analyze, analyze_par, generate_c, AnalysisSummary, FunctionKind, SchemaError};
use pretty_assertions::assert_eq;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze_fixture(name: &str) -> AnalysisSummary {
    let document = load_document(&testdata_path().join(format!("{name}.ast.json")), None)
        .expect("fixture should load");
    analyze(&document).expect("fixture should have an ext list")
}

fn expected_fixture(name: &str) -> AnalysisSummary {
    let path = testdata_path().join(format!("{name}.expected.json"));
    let src = std::fs::read_to_string(&path).expect("expected fixture should exist");
    from_str_with_path(&src).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn fixtures_match_expected_summaries() {
    for name in ["minimal", "sample", "degraded"] {
        assert_eq!(analyze_fixture(name), expected_fixture(name), "fixture {name}");
    }
}

#[test]
fn sample_keeps_source_order_and_kinds() {
    let summary = analyze_fixture("sample");
    let names: Vec<_> = summary.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["split", "clamp", "usage", "main"]);
    assert_eq!(summary.definitions().count(), 2);
    assert_eq!(summary.declarations().count(), 2);
    assert!(summary
        .declarations()
        .all(|f| f.kind == FunctionKind::Declaration && f.conditional_count.is_none()));
}

#[test]
fn parallel_analysis_matches_sequential() {
    let document = load_document(&testdata_path().join("sample.ast.json"), None).unwrap();
    assert_eq!(analyze_par(&document).unwrap(), analyze(&document).unwrap());
}

#[test]
fn missing_ext_produces_no_summary() {
    let document = load_document(&testdata_path().join("no_ext.json"), None).unwrap();
    assert_eq!(analyze(&document), Err(SchemaError::MissingExt));
}

#[test]
fn minimal_text_report() {
    let expected = "\
Function: main
Return Type: int
Parameters:
    None
if-condition count: 2

Function: helper
Return Type: void
Parameters:
    int x

Total number of functions: 2
";
    assert_eq!(render_text(&analyze_fixture("minimal")), expected);
}

#[test]
fn json_pointer_reaches_wrapped_ast() {
    let dir = std::env::temp_dir().join(format!("ast-summary-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let wrapped = dir.join("wrapped.json");
    let inner: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(testdata_path().join("minimal.ast.json")).unwrap()).unwrap();
    std::fs::write(&wrapped, serde_json::json!({ "parser": "pycparser", "ast": inner }).to_string()).unwrap();

    let document = load_document(Path::new(&wrapped), Some("/ast")).unwrap();
    assert_eq!(analyze(&document).unwrap(), expected_fixture("minimal"));
    assert!(load_document(Path::new(&wrapped), Some("/nope")).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn sample_regenerates_c_source() {
    let document = load_document(&testdata_path().join("sample.ast.json"), None).unwrap();
    let expected = std::fs::read_to_string(testdata_path().join("sample.expected.c")).unwrap();
    assert_eq!(generate_c(&document), expected);
}

#[test]
fn regenerated_source_keeps_every_function() {
    let document = load_document(&testdata_path().join("sample.ast.json"), None).unwrap();
    let source = generate_c(&document);
    for func in analyze(&document).unwrap().functions {
        assert!(source.contains(&format!("{}(", func.name)), "{} missing", func.name);
    }
}
