//! Props schema builder
//!
//! The props schema is the merge of six contributions, applied in this order
//! so that a later one overrides an earlier one on a key collision:
//!
//! 1. Base: `attach`
//! 2. Disposable: `dispose`
//! 3. Ref: `ref`
//! 4. Class-Args: `args`, constructible types only
//! 5. Capability-gated: see [`CapabilityRegistry`]
//! 6. Instance-derived: one entry per settable field
//!
//! The result is always open to arbitrary extra keys.

use tracing::trace;
use wrapt_types::{TypeContext, TypeId};

use crate::capability::CapabilityRegistry;
use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::exclusion::ExclusionPolicy;
use crate::schema::{Contribution, PropsSchema, SchemaEntry};

/// Builds props schemas with a given exclusion policy and capability set
#[derive(Debug, Clone, Copy)]
pub struct PropsBuilder<'a> {
    policy: &'a ExclusionPolicy,
    capabilities: &'a CapabilityRegistry,
}

impl<'a> PropsBuilder<'a> {
    /// Create a builder
    pub fn new(policy: &'a ExclusionPolicy, capabilities: &'a CapabilityRegistry) -> Self {
        Self {
            policy,
            capabilities,
        }
    }

    /// Derive the props schema of a descriptor
    pub fn build(&self, ctx: &mut TypeContext, descriptor: &TypeDescriptor) -> PropsSchema {
        let mut schema = PropsSchema::open();

        base_props(ctx, descriptor, &mut schema);
        disposable_props(ctx, &mut schema);
        ref_props(descriptor, &mut schema);
        class_args_props(ctx, descriptor, &mut schema);
        self.capabilities.contribute(ctx, descriptor, &mut schema);
        self.instance_props(ctx, descriptor, &mut schema);

        schema
    }

    fn instance_props(&self, ctx: &mut TypeContext, descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
        for (name, field) in &descriptor.fields {
            if self.policy.is_excluded(name) {
                trace!(ty = %descriptor.name, field = %name, reason = "excluded", "skipping field");
                continue;
            }
            if field.is_function_valued {
                trace!(ty = %descriptor.name, field = %name, reason = "function", "skipping field");
                continue;
            }
            let ty = instance_prop_type(ctx, field);
            schema.insert(name.clone(), SchemaEntry::optional(ty, Contribution::Instance));
        }
    }
}

/// `attach?: string | ((parent, self) => (() => void) | void)`
fn base_props(ctx: &mut TypeContext, descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
    let string = ctx.string_type();
    let unknown = ctx.unknown_type();
    let void = ctx.void_type();

    let teardown = ctx.function_type(vec![], void);
    let returns = ctx.union_type(vec![teardown, void]);
    let attach_fn = ctx.function_type(vec![unknown, descriptor.instance], returns);
    let attach = ctx.union_type(vec![string, attach_fn]);

    schema.insert("attach", SchemaEntry::optional(attach, Contribution::Base));
}

/// `dispose?: boolean`
fn disposable_props(ctx: &mut TypeContext, schema: &mut PropsSchema) {
    let boolean = ctx.boolean_type();
    schema.insert("dispose", SchemaEntry::optional(boolean, Contribution::Disposable));
}

/// `ref?: Instance`
fn ref_props(descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
    schema.insert("ref", SchemaEntry::optional(descriptor.instance, Contribution::Ref));
}

/// `args?: [...constructor params]`, or `unknown[]` when the params are not known
fn class_args_props(ctx: &mut TypeContext, descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
    if !descriptor.is_class {
        return;
    }
    let args = match &descriptor.constructor_params {
        Some(params) => ctx.tuple_type(params.clone()),
        None => {
            let unknown = ctx.unknown_type();
            ctx.array_type(unknown)
        }
    };
    schema.insert("args", SchemaEntry::optional(args, Contribution::ClassArgs));
}

/// Type a settable field accepts
///
/// With `set(p0, ..., pn)` the caller may pass the full argument list or the
/// first argument alone: `[p0, ..., pn] | p0`.
pub fn instance_prop_type(ctx: &mut TypeContext, field: &FieldDescriptor) -> TypeId {
    let Some(params) = &field.set_method else {
        return field.value_type;
    };
    let full = ctx.tuple_type(params.clone());
    match params.first() {
        Some(&first) => ctx.union_type(vec![full, first]),
        None => full,
    }
}

/// Derive a props schema with the default policy and built-in capabilities
pub fn derive_props(ctx: &mut TypeContext, descriptor: &TypeDescriptor) -> PropsSchema {
    let policy = ExclusionPolicy::new();
    let capabilities = CapabilityRegistry::new();
    PropsBuilder::new(&policy, &capabilities).build(ctx, descriptor)
}
