//! Typed deserialization that remembers where in the document it failed.
use serde::de::DeserializeOwned;

/// A `serde_json` error plus the path (`functions[0].kind`) it occurred at.
pub type PathError = serde_path_to_error::Error<serde_json::Error>;

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, PathError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize(de)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::AnalysisSummary;

    #[test]
    fn error_names_the_failing_path() {
        let src = r#"{ "functions": [{ "name": "f", "return_type": 3 }], "total_count": 1 }"#;
        let err = from_str_with_path::<AnalysisSummary>(src).unwrap_err();
        assert_eq!(err.path().to_string(), "functions[0].return_type");
        assert!(err.inner().is_data());
    }

    #[test]
    fn unknown_kind_is_located() {
        let src = r#"{ "functions": [{ "name": "f", "return_type": "int", "parameters": [], "kind": "macro" }], "total_count": 1 }"#;
        let err = from_str_with_path::<AnalysisSummary>(src).unwrap_err();
        assert_eq!(err.path().to_string(), "functions[0].kind");
    }

    #[test]
    fn valid_summary_parses() {
        let src = r#"{ "functions": [], "total_count": 0 }"#;
        assert_eq!(from_str_with_path::<AnalysisSummary>(src).unwrap(), AnalysisSummary::default());
    }
}
