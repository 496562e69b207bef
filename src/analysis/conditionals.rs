use crate::document::{AstNode, NODETYPE_KEY};

/// Node type of a conditional statement.
pub const IF_NODETYPE: &str = "If";

/// Count every object anywhere under `node` (itself included) whose
/// `_nodetype` is `"If"`.
pub fn count_conditionals<N: AstNode + ?Sized>(node: &N) -> usize {
    count_nodetype(node, IF_NODETYPE)
}

/// Generic form of [`count_conditionals`] for any node type.
pub fn count_nodetype<N: AstNode + ?Sized>(node: &N, nodetype: &str) -> usize {
    node.children()
        .map(|(key, child)| {
            let hit = key == Some(NODETYPE_KEY) && child.as_str() == Some(nodetype);
            usize::from(hit) + count_nodetype(child, nodetype)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_conditionals() {
        assert_eq!(count_conditionals(&json!(null)), 0);
        assert_eq!(count_conditionals(&json!("If")), 0);
        assert_eq!(count_conditionals(&json!(["If", { "kind": "If" }])), 0);
        let body = json!({
            "_nodetype": "Compound",
            "block_items": [
                { "_nodetype": "Return", "expr": { "_nodetype": "Constant", "value": "0" } }
            ]
        });
        assert_eq!(count_conditionals(&body), 0);
    }

    #[test]
    fn counts_the_root_and_every_nesting_level() {
        let body = json!({
            "_nodetype": "If",
            "cond": { "_nodetype": "ID", "name": "a" },
            "iftrue": {
                "_nodetype": "Compound",
                "block_items": [
                    { "_nodetype": "If", "iftrue": { "_nodetype": "If", "iftrue": null } },
                    { "_nodetype": "While", "stmt": [[{ "_nodetype": "If" }]] }
                ]
            },
            "iffalse": { "_nodetype": "If", "cond": null }
        });
        assert_eq!(count_conditionals(&body), 5);
    }

    #[test]
    fn only_string_markers_count() {
        let body = json!([
            { "_nodetype": ["If"] },
            { "_nodetype": { "_nodetype": "If" } },
            { "_nodetype": "if" },
            { "type": "If" }
        ]);
        assert_eq!(count_conditionals(&body), 1);
    }

    #[test]
    fn other_node_types() {
        let body = json!({ "block_items": [{ "_nodetype": "For" }, { "_nodetype": "If", "iftrue": { "_nodetype": "For" } }] });
        assert_eq!(count_nodetype(&body, "For"), 2);
        assert_eq!(count_nodetype(&body, "Switch"), 0);
    }
}
