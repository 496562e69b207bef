//! Function summaries from a JSON-serialized C AST (pycparser's `to_dict`
//! layout): names, flattened return and parameter types, and the number of
//! `if` statements in each definition. [`codegen`] turns the same AST back
//! into C source.
//!
//! ```
//! let ast = serde_json::json!({ "_nodetype": "FileAST", "ext": [] });
//! let summary = ast_summary::analyze(&ast).unwrap();
//! assert_eq!(summary.total_count, 0);
//! ```
pub mod analysis;
pub mod cli;
pub mod codegen;
pub mod document;
pub mod error;
pub mod ir;
pub mod path_de;
pub mod render;

pub use analysis::{analyze, analyze_par, build_report, count_conditionals, extract_parameters, resolve_type};
pub use codegen::generate_c;
pub use document::{AstNode, DeclNode, NodeTag};
pub use error::{InputError, SchemaError};
pub use ir::{AnalysisSummary, FunctionKind, FunctionReport, Parameter, ResolvedType};
