//! Read-only view over an already-parsed AST document.
//!
//! The analysis never touches `serde_json::Value` directly; it walks any
//! tree that can answer the handful of queries in [`AstNode`]. Parsing raw
//! text into such a tree is the caller's job.
use serde_json::Value;

/// Key holding the node discriminant in every pycparser-style AST object.
pub const NODETYPE_KEY: &str = "_nodetype";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag { Null, Bool, Number, String, Array, Object }

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeTag::Null => "null",
            NodeTag::Bool => "boolean",
            NodeTag::Number => "number",
            NodeTag::String => "string",
            NodeTag::Array => "array",
            NodeTag::Object => "object",
        };
        f.write_str(name)
    }
}

/// The query surface the analysis consumes.
///
/// Lookups never fail: a missing key, an out-of-range index, or asking an
/// array for a field all come back as `None`.
pub trait AstNode {
    fn tag(&self) -> NodeTag;
    fn field(&self, key: &str) -> Option<&Self>;
    /// Array length; `0` for anything that is not an array.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool { self.len() == 0 }
    fn at(&self, index: usize) -> Option<&Self>;
    fn as_str(&self) -> Option<&str>;
    /// Every value held by an object (in key order) or array (in index order).
    fn children(&self) -> impl Iterator<Item = (Option<&str>, &Self)>;

    fn is_object(&self) -> bool { self.tag() == NodeTag::Object }
    fn is_array(&self) -> bool { self.tag() == NodeTag::Array }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Self::as_str)
    }
    fn node_type(&self) -> Option<&str> {
        self.str_field(NODETYPE_KEY)
    }
    fn elements(&self) -> impl Iterator<Item = &Self> {
        (0..self.len()).filter_map(move |i| self.at(i))
    }
}

/// Declarator node kinds that take part in type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclNode {
    IdentifierType,
    TypeDecl,
    Typename,
    PtrDecl,
    FuncDecl,
    Other(String),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl AstNode for Value {
    fn tag(&self) -> NodeTag {
        match self {
            Value::Null      => NodeTag::Null,
            Value::Bool(_)   => NodeTag::Bool,
            Value::Number(_) => NodeTag::Number,
            Value::String(_) => NodeTag::String,
            Value::Array(_)  => NodeTag::Array,
            Value::Object(_) => NodeTag::Object,
        }
    }
    fn field(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
    fn len(&self) -> usize {
        match self {
            Value::Array(xs) => xs.len(),
            _ => 0,
        }
    }
    fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Value::Array(xs) => xs.get(index),
            _ => None,
        }
    }
    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }
    fn children(&self) -> impl Iterator<Item = (Option<&str>, &Self)> {
        let (object, array) = match self {
            Value::Object(map) => (Some(map.iter()), None),
            Value::Array(xs) => (None, Some(xs.iter())),
            _ => (None, None),
        };
        object
            .into_iter()
            .flatten()
            .map(|(k, v)| (Some(k.as_str()), v))
            .chain(array.into_iter().flatten().map(|v| (None, v)))
    }
}

impl DeclNode {
    /// Classify a node by its `_nodetype`; `None` when the node has no
    /// string discriminant at all.
    pub fn classify<N: AstNode + ?Sized>(node: &N) -> Option<Self> {
        node.node_type().map(Self::from)
    }
}

impl From<&str> for DeclNode {
    fn from(tag: &str) -> Self {
        match tag {
            "IdentifierType" => DeclNode::IdentifierType,
            "TypeDecl" => DeclNode::TypeDecl,
            "Typename" => DeclNode::Typename,
            "PtrDecl" => DeclNode::PtrDecl,
            "FuncDecl" => DeclNode::FuncDecl,
            other => DeclNode::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_lookups_are_none() {
        let doc = json!({ "a": [1, "two"] });
        assert!(doc.field("b").is_none());
        assert!(doc.at(0).is_none());
        assert_eq!(doc.field("a").map(AstNode::len), Some(2));
        assert_eq!(doc.field("a").map(AstNode::is_empty), Some(false));
        assert!(AstNode::is_empty(&json!([])));
        assert!(AstNode::is_empty(&json!({ "a": 1 })));
        assert_eq!(doc.field("a").and_then(|a| a.at(1)).and_then(AstNode::as_str), Some("two"));
        assert!(doc.field("a").and_then(|a| a.at(5)).is_none());
        assert_eq!(json!("x").field("a"), None);
    }

    #[test]
    fn children_keep_input_order() {
        let doc = json!({ "z": 1, "a": 2, "m": 3 });
        let keys: Vec<_> = doc.children().filter_map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let arr = json!([true, null, 3]);
        let tags: Vec<_> = arr.children().map(|(_, v)| v.tag()).collect();
        assert_eq!(tags, vec![NodeTag::Bool, NodeTag::Null, NodeTag::Number]);

        assert_eq!(json!(4).children().count(), 0);
    }

    #[test]
    fn classify_declarators() {
        assert_eq!(DeclNode::classify(&json!({ "_nodetype": "PtrDecl" })), Some(DeclNode::PtrDecl));
        assert_eq!(
            DeclNode::classify(&json!({ "_nodetype": "ArrayDecl" })),
            Some(DeclNode::Other("ArrayDecl".into()))
        );
        assert_eq!(DeclNode::classify(&json!({ "_nodetype": 7 })), None);
        assert_eq!(DeclNode::classify(&json!([])), None);
    }
}
