use crate::document::AstNode;
use crate::ir::{Parameter, ResolvedType};
use super::resolve_type;

/// Pair every entry of `args.params` with its resolved type, in declared order.
///
/// A missing or non-object `args`, or one without a `params` array, yields
/// an empty list (rendered as `None`).
pub fn extract_parameters<N: AstNode + ?Sized>(args: Option<&N>) -> Vec<Parameter> {
    let Some(params) = args
        .filter(|args| args.is_object())
        .and_then(|args| args.field("params"))
        .filter(|params| params.is_array())
    else {
        return Vec::new();
    };
    params
        .elements()
        .map(|param| {
            let ty = param
                .field("type")
                .map(resolve_type)
                .unwrap_or_else(ResolvedType::unknown);
            Parameter::new(ty, param.str_field("name"))
        })
        .collect()
}
