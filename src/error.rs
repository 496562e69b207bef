use std::path::PathBuf;

use thiserror::Error;

use crate::document::NodeTag;

/// The document is not a recognizable AST: there is no top-level
/// declaration list to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("AST document has no `ext` field")]
    MissingExt,
    #[error("AST document `ext` field is {found}, expected an array")]
    ExtNotArray { found: NodeTag },
}

/// Failures while turning an input source into a document tree.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse JSON ({})", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("JSON pointer `{pointer}` selects nothing in {}", path.display())]
    Pointer { path: PathBuf, pointer: String },
    #[error("stdin ('-') can only be given once as an input")]
    RepeatedStdin,
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error("invalid glob pattern")]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn underlying_error_is_reported_once() {
        let cause = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let cause_text = cause.to_string();
        let err = InputError::Parse { path: PathBuf::from("-"), source: cause };
        assert_eq!(err.to_string(), "failed to parse JSON (-)");
        assert_eq!(err.source().map(ToString::to_string), Some(cause_text.clone()));

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain.matches(&cause_text).count(), 1, "{chain}");
    }

    #[test]
    fn read_errors_keep_the_io_cause() {
        let err = InputError::Read {
            path: PathBuf::from("ast.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read ast.json");
        assert_eq!(format!("{:#}", anyhow::Error::from(err)), "failed to read ast.json: gone");
    }
}
