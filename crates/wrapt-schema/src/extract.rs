//! Descriptor extraction
//!
//! Reads a wrapped type out of a [`TypeContext`] and flattens it into a
//! [`TypeDescriptor`]:
//!
//! - `Class` → constructible; fields are the instance members.
//! - `Instance` → the same members, not constructible.
//! - `Object` → its properties.
//! - anything else → no structure at all.
//!
//! Inherited members come after own members and are shadowed by them. The
//! `extends` walk stops on a revisited class and field values are inspected
//! one level deep, so extraction terminates on self-referential shapes.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};
use wrapt_types::{string_literals, Type, TypeContext, TypeId};

use crate::config::IntrospectionConfig;
use crate::descriptor::{Capabilities, EventDispatch, FieldDescriptor, TypeDescriptor};
use crate::error::SchemaError;
use crate::exclusion::is_marker_name;

/// A member as declared on a class or object
#[derive(Debug, Clone, Copy)]
struct Member {
    ty: TypeId,
    is_method: bool,
}

/// Builds descriptors from types in a [`TypeContext`]
#[derive(Debug, Clone, Default)]
pub struct DescriptorExtractor {
    config: IntrospectionConfig,
}

impl DescriptorExtractor {
    /// Extractor using the conventional `set` / `addEventListener` members
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor with custom member names
    pub fn with_config(config: IntrospectionConfig) -> Self {
        Self { config }
    }

    /// Describe the type behind `ty`
    ///
    /// Fails only when `ty` does not belong to `ctx`.
    pub fn extract(&self, ctx: &mut TypeContext, ty: TypeId) -> Result<TypeDescriptor, SchemaError> {
        let resolved = ctx.resolve(ty)?.clone();

        let (name, instance, is_class, constructor_params, members) = match resolved {
            Type::Class(class) => {
                let members = collect_class_members(ctx, ty);
                let instance = ctx.instance_type(ty);
                (class.name, instance, true, class.constructor, members)
            }
            Type::Instance(inst) => {
                let name = match ctx.get(inst.class) {
                    Some(Type::Class(c)) => c.name.clone(),
                    _ => ctx.display(ty),
                };
                let members = collect_class_members(ctx, inst.class);
                (name, ty, false, None, members)
            }
            Type::Object(obj) => {
                let members = obj
                    .properties
                    .iter()
                    .map(|p| {
                        (
                            p.name.clone(),
                            Member {
                                ty: p.ty,
                                is_method: false,
                            },
                        )
                    })
                    .collect();
                (ctx.display(ty), ty, false, None, members)
            }
            _ => {
                let name = ctx.display(ty);
                debug!(ty = %name, "no field structure, using empty descriptor");
                return Ok(TypeDescriptor::primitive(name, ty));
            }
        };

        let mut fields = IndexMap::with_capacity(members.len());
        let mut capabilities = Capabilities::none();

        for (field_name, member) in &members {
            let is_function_valued =
                member.is_method || ctx.get(member.ty).is_some_and(Type::is_function);

            let set_method = if is_function_valued {
                None
            } else {
                self.set_params(ctx, member.ty)
            };

            if !member.is_method && is_marker_name(field_name) && is_true_literal(ctx, member.ty) {
                trace!(ty = %name, flag = %field_name, "capability marker");
                capabilities.flags.insert(field_name.clone());
            }

            fields.insert(
                field_name.clone(),
                FieldDescriptor {
                    value_type: member.ty,
                    is_function_valued,
                    set_method,
                },
            );
        }

        if let Some(member) = members.get(&self.config.dispatch_method) {
            capabilities.event_dispatch = event_dispatch(ctx, member.ty);
            if capabilities.event_dispatch.is_none() {
                trace!(ty = %name, "dispatch method present but not discriminated");
            }
        }

        debug!(
            ty = %name,
            is_class,
            fields = fields.len(),
            flags = capabilities.flags.len(),
            events = capabilities.supports_event_dispatch(),
            "extracted descriptor"
        );

        Ok(TypeDescriptor {
            name,
            instance,
            is_class,
            constructor_params,
            fields,
            capabilities,
        })
    }

    /// Parameters of the value's `set(...)` method, for object and instance values
    fn set_params(&self, ctx: &TypeContext, value: TypeId) -> Option<Vec<TypeId>> {
        if !matches!(ctx.get(value)?, Type::Object(_) | Type::Instance(_)) {
            return None;
        }
        let set = ctx.member_type(value, &self.config.set_method)?;
        ctx.get(set)?.as_function().map(|f| f.params.clone())
    }
}

/// Own members first, then each ancestor's members not already seen
fn collect_class_members(ctx: &TypeContext, class: TypeId) -> IndexMap<String, Member> {
    let mut members = IndexMap::new();
    let mut visited = FxHashSet::default();
    let mut current = Some(class);

    while let Some(id) = current {
        if !visited.insert(id) {
            trace!(class = %id, "cyclic extends chain");
            break;
        }
        let Some(Type::Class(c)) = ctx.get(id) else {
            break;
        };
        for prop in &c.properties {
            members.entry(prop.name.clone()).or_insert(Member {
                ty: prop.ty,
                is_method: false,
            });
        }
        for method in &c.methods {
            members.entry(method.name.clone()).or_insert(Member {
                ty: method.ty,
                is_method: true,
            });
        }
        current = c.extends;
    }

    members
}

fn is_true_literal(ctx: &TypeContext, ty: TypeId) -> bool {
    matches!(ctx.get(ty), Some(Type::BooleanLiteral(true)))
}

/// Read `(eventName, handler) => ...` where eventName is a set of string literals
fn event_dispatch(ctx: &TypeContext, method: TypeId) -> Option<EventDispatch> {
    let dispatch = ctx.get(method)?.as_function()?;
    let (&names, &handler) = (dispatch.params.first()?, dispatch.params.get(1)?);

    let event_names = string_literals(ctx, names)?;
    let handler_event = *ctx.get(handler)?.as_function()?.params.first()?;

    Some(EventDispatch {
        event_names,
        handler_event,
    })
}
