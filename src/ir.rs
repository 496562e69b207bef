// Strongly-typed summary records. No serde_json::Value here.
use serde::{Deserialize, Serialize};

/// Fallback for any type or function name that cannot be recovered.
pub const UNKNOWN: &str = "unknown";
/// Fallback for a parameter without a name (e.g. `int f(char *)`).
pub const ANONYMOUS: &str = "anonymous";

/// A flattened C type: `int`, `*char`, `**int` or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedType(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: ResolvedType,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Definition,
    Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub name: String,
    pub return_type: ResolvedType,
    pub parameters: Vec<Parameter>,      // declared order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_count: Option<usize>, // definitions only
    pub kind: FunctionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub functions: Vec<FunctionReport>,
    pub total_count: usize,              // == functions.len()
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ResolvedType {
    pub fn unknown() -> Self { Self(UNKNOWN.to_string()) }
    pub fn named(name: impl Into<String>) -> Self { Self(name.into()) }
    /// One more level of indirection: `int` → `*int`.
    pub fn pointer_to(inner: ResolvedType) -> Self {
        let mut out = String::with_capacity(inner.0.len() + 1);
        out.push('*');
        out.push_str(&inner.0);
        Self(out)
    }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn is_unknown(&self) -> bool { self.base() == UNKNOWN }
    pub fn pointer_depth(&self) -> usize {
        self.0.chars().take_while(|c| *c == '*').count()
    }
    /// The name under all pointer prefixes.
    pub fn base(&self) -> &str { self.0.trim_start_matches('*') }
}

impl std::fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ResolvedType {
    fn eq(&self, other: &&str) -> bool { self.0 == *other }
}

impl Parameter {
    pub fn new(ty: ResolvedType, name: Option<&str>) -> Self {
        Self { ty, name: name.unwrap_or(ANONYMOUS).to_string() }
    }
}

impl FunctionReport {
    pub fn is_definition(&self) -> bool { self.kind == FunctionKind::Definition }
}

impl AnalysisSummary {
    pub fn definitions(&self) -> impl Iterator<Item = &FunctionReport> {
        self.functions.iter().filter(|f| f.is_definition())
    }
    pub fn declarations(&self) -> impl Iterator<Item = &FunctionReport> {
        self.functions.iter().filter(|f| !f.is_definition())
    }
    /// Keep only functions whose name matches; `total_count` follows.
    pub fn retain_names(&mut self, pattern: &regex::Regex) {
        self.functions.retain(|f| pattern.is_match(&f.name));
        self.total_count = self.functions.len();
    }
}

impl FromIterator<FunctionReport> for AnalysisSummary {
    fn from_iter<I: IntoIterator<Item = FunctionReport>>(iter: I) -> Self {
        let functions: Vec<FunctionReport> = iter.into_iter().collect();
        let total_count = functions.len();
        Self { functions, total_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_prefixing_compounds() {
        let t = ResolvedType::pointer_to(ResolvedType::pointer_to(ResolvedType::named("int")));
        assert_eq!(t, "**int");
        assert_eq!(t.pointer_depth(), 2);
        assert_eq!(t.base(), "int");
        assert!(!t.is_unknown());
        assert!(ResolvedType::pointer_to(ResolvedType::unknown()).is_unknown());
    }

    #[test]
    fn declarations_omit_conditional_count() {
        let decl = FunctionReport {
            name: "helper".into(),
            return_type: ResolvedType::named("void"),
            parameters: vec![Parameter::new(ResolvedType::named("int"), None)],
            conditional_count: None,
            kind: FunctionKind::Declaration,
        };
        let json = serde_json::to_value(&decl).unwrap();
        assert_eq!(json["kind"], "declaration");
        assert_eq!(json["parameters"][0]["type"], "int");
        assert_eq!(json["parameters"][0]["name"], ANONYMOUS);
        assert!(json.get("conditional_count").is_none());
    }

    #[test]
    fn retain_keeps_total_in_step() {
        let mk = |name: &str| FunctionReport {
            name: name.into(),
            return_type: ResolvedType::named("int"),
            parameters: Vec::new(),
            conditional_count: Some(0),
            kind: FunctionKind::Definition,
        };
        let mut summary: AnalysisSummary = ["main", "parse_args", "parse_file"].into_iter().map(mk).collect();
        assert_eq!(summary.total_count, 3);
        summary.retain_names(&regex::Regex::new("^parse_").unwrap());
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.functions[0].name, "parse_args");
    }
}
