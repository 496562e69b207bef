//! Function summary extraction over a pycparser-style JSON AST.
//!
//! The document's `ext` list holds file-scope declarations. Two kinds of
//! entries describe functions:
//! - `FuncDef`: a definition; its signature sits under `decl`, its
//!   statements under `body`.
//! - `Decl` whose `type._nodetype` is `FuncDecl`: a prototype.
//!
//! Everything else (globals, typedefs, struct declarations) is skipped.
//! Inside a function nothing is fatal: missing structure degrades to the
//! `unknown` / `anonymous` sentinels, an empty parameter list, or an absent
//! conditional count.
pub mod conditionals;
pub mod params;
pub mod types;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::document::{AstNode, DeclNode};
use crate::error::SchemaError;
use crate::ir::{AnalysisSummary, FunctionKind, FunctionReport, ResolvedType, UNKNOWN};

pub use conditionals::{count_conditionals, count_nodetype};
pub use params::extract_parameters;
pub use types::resolve_type;

const FUNC_DEF: &str = "FuncDef";
const DECL: &str = "Decl";

// ------------------------------ Reporter --------------------------------- //

/// Summarize one `FuncDef` or function `Decl` node.
pub fn build_report<N: AstNode + ?Sized>(func: &N) -> FunctionReport {
    let kind = if func.node_type() == Some(FUNC_DEF) {
        FunctionKind::Definition
    } else {
        FunctionKind::Declaration
    };
    let decl = match kind {
        FunctionKind::Definition => func.field("decl"),
        FunctionKind::Declaration => Some(func),
    };
    let decl_type = decl.and_then(|d| d.field("type"));

    let name = decl
        .and_then(|d| d.str_field("name"))
        .unwrap_or(UNKNOWN)
        .to_string();
    let return_type = decl_type.map(resolve_type).unwrap_or_else(ResolvedType::unknown);
    let parameters = extract_parameters(decl_type.and_then(|t| t.field("args")));
    let conditional_count = match kind {
        FunctionKind::Definition => Some(func.field("body").map(count_conditionals).unwrap_or(0)),
        FunctionKind::Declaration => None,
    };

    FunctionReport { name, return_type, parameters, conditional_count, kind }
}

// ------------------------------- Walker ---------------------------------- //

/// True for `FuncDef` entries and for `Decl` entries declaring a function.
pub fn is_function_entry<N: AstNode + ?Sized>(entry: &N) -> bool {
    match entry.node_type() {
        Some(FUNC_DEF) => true,
        Some(DECL) => entry
            .field("type")
            .and_then(DeclNode::classify)
            .is_some_and(|kind| kind == DeclNode::FuncDecl),
        _ => false,
    }
}

/// Summarize every function in the document's top-level `ext` list, in
/// encounter order.
pub fn analyze<N: AstNode + ?Sized>(document: &N) -> Result<AnalysisSummary, SchemaError> {
    let ext = top_level(document)?;
    let summary: AnalysisSummary = ext
        .elements()
        .filter(|entry| classify_entry(*entry))
        .map(build_report)
        .collect();
    info!(total = summary.total_count, "analysis finished");
    Ok(summary)
}

/// Same result as [`analyze`], with per-function work spread over the
/// rayon pool. Output order still follows `ext`.
pub fn analyze_par<N>(document: &N) -> Result<AnalysisSummary, SchemaError>
where
    N: AstNode + Sync + ?Sized,
{
    let ext = top_level(document)?;
    let entries: Vec<&N> = ext.elements().collect();
    let functions: Vec<FunctionReport> = entries
        .par_iter()
        .filter(|entry| classify_entry(**entry))
        .map(|entry| build_report(*entry))
        .collect();
    let summary = AnalysisSummary::from_iter(functions);
    info!(total = summary.total_count, "analysis finished");
    Ok(summary)
}

fn top_level<N: AstNode + ?Sized>(document: &N) -> Result<&N, SchemaError> {
    let ext = document.field("ext").ok_or(SchemaError::MissingExt)?;
    if !ext.is_array() {
        return Err(SchemaError::ExtNotArray { found: ext.tag() });
    }
    Ok(ext)
}

fn classify_entry<N: AstNode + ?Sized>(entry: &N) -> bool {
    let keep = is_function_entry(entry);
    if keep {
        debug!(nodetype = entry.node_type(), name = entry_name(entry), "function entry");
    } else {
        debug!(nodetype = entry.node_type(), "skipping top-level entry");
    }
    keep
}

fn entry_name<N: AstNode + ?Sized>(entry: &N) -> Option<&str> {
    entry
        .str_field("name")
        .or_else(|| entry.field("decl").and_then(|d| d.str_field("name")))
}
