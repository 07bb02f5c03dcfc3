//! Discriminant narrowing and literal extraction
//!
//! Narrowing picks the members of a discriminated union whose discriminant
//! field is a given literal, the same way `event.type === "added"` narrows
//! `event` in a conditional branch.

use crate::context::TypeContext;
use crate::ty::{Type, TypeId};

/// Narrow `ty` to the members whose `field` property is the string literal `value`
///
/// - Union: keeps the matching members (a single match is returned directly).
/// - Object or instance: kept if it matches.
/// - Nothing matches: `never`.
pub fn narrow_by_discriminant(
    ctx: &mut TypeContext,
    ty: TypeId,
    field: &str,
    value: &str,
) -> TypeId {
    let members = match ctx.get(ty) {
        Some(Type::Union(u)) => u.members.clone(),
        Some(_) => vec![ty],
        None => return ctx.never_type(),
    };

    let matching: Vec<TypeId> = members
        .into_iter()
        .filter(|&member| discriminant_matches(ctx, member, field, value))
        .collect();

    // union_type collapses empty to never and a single member to itself
    ctx.union_type(matching)
}

/// Whether `ty` carries a `field` typed as exactly the literal `value`
///
/// A field typed `"added" | "removed"` or plain `string` is not tagged by
/// either name and never matches.
fn discriminant_matches(ctx: &TypeContext, ty: TypeId, field: &str, value: &str) -> bool {
    ctx.property_type(ty, field)
        .and_then(|field_ty| ctx.get(field_ty))
        .and_then(Type::as_string_literal)
        == Some(value)
}

/// Collect the string values of a string literal or a union of string literals
///
/// Returns `None` when any member is not a string literal, e.g. plain `string`.
pub fn string_literals(ctx: &TypeContext, ty: TypeId) -> Option<Vec<String>> {
    match ctx.get(ty)? {
        Type::StringLiteral(s) => Some(vec![s.clone()]),
        Type::Union(u) => u
            .members
            .iter()
            .map(|&member| ctx.get(member)?.as_string_literal().map(str::to_string))
            .collect(),
        _ => None,
    }
}
