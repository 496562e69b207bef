use tracing::trace;

use crate::document::{AstNode, DeclNode};
use crate::ir::ResolvedType;

/// Flatten a declarator chain into a type string.
///
/// `TypeDecl`, `Typename` and `FuncDecl` are transparent, each `PtrDecl`
/// prefixes one `*`, and an `IdentifierType` ends the chain with the first
/// of its `names`. Anything else resolves to `unknown`.
pub fn resolve_type<N: AstNode + ?Sized>(node: &N) -> ResolvedType {
    let Some(kind) = DeclNode::classify(node) else {
        trace!(tag = %node.tag(), "declarator without a string _nodetype");
        return ResolvedType::unknown();
    };
    match kind {
        DeclNode::IdentifierType => node
            .field("names")
            .and_then(|names| names.at(0))
            .and_then(AstNode::as_str)
            .map(ResolvedType::named)
            .unwrap_or_else(|| {
                trace!("IdentifierType without a leading name");
                ResolvedType::unknown()
            }),
        DeclNode::TypeDecl | DeclNode::Typename | DeclNode::FuncDecl => resolve_inner(node),
        DeclNode::PtrDecl => ResolvedType::pointer_to(resolve_inner(node)),
        DeclNode::Other(tag) => {
            trace!(%tag, "unsupported declarator");
            ResolvedType::unknown()
        }
    }
}

fn resolve_inner<N: AstNode + ?Sized>(node: &N) -> ResolvedType {
    match node.field("type") {
        Some(inner) => resolve_type(inner),
        None => ResolvedType::unknown(),
    }
}
