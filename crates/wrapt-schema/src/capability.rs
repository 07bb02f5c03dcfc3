//! Capability-gated props
//!
//! Each contributor implements [`CapabilityProps`] and names the marker flag
//! it keys off. The [`CapabilityRegistry`] runs every contributor whose flag
//! the descriptor carries; without the flag a contributor adds nothing.

use wrapt_types::TypeContext;

use crate::descriptor::{TypeDescriptor, CAMERA_FLAG};
use crate::schema::{Contribution, PropsSchema, SchemaEntry};

/// Props contributed when a wrapped type carries a capability marker
pub trait CapabilityProps: Send + Sync {
    /// Marker flag that enables this contributor, e.g. `isCamera`
    fn flag(&self) -> &str;

    /// Add this contributor's entries to `schema`
    fn contribute(&self, ctx: &mut TypeContext, descriptor: &TypeDescriptor, schema: &mut PropsSchema);
}

/// Camera handling switches
///
/// - `manual` (default `true`): the consumer updates aspect and frustum itself
///   instead of following the canvas size.
/// - `makeDefault` (default `false`): the camera becomes the scene's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraProps;

impl CapabilityProps for CameraProps {
    fn flag(&self) -> &str {
        CAMERA_FLAG
    }

    fn contribute(&self, ctx: &mut TypeContext, _descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
        let boolean = ctx.boolean_type();
        let source = Contribution::Capability(CAMERA_FLAG.to_string());
        schema.insert(
            "manual",
            SchemaEntry::optional(boolean, source.clone()).with_default(true),
        );
        schema.insert(
            "makeDefault",
            SchemaEntry::optional(boolean, source).with_default(false),
        );
    }
}

/// Returns the built-in contributors
pub fn builtin_capabilities() -> Vec<Box<dyn CapabilityProps>> {
    vec![Box::new(CameraProps)]
}

/// Ordered set of capability contributors
pub struct CapabilityRegistry {
    contributors: Vec<Box<dyn CapabilityProps>>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.contributors.iter().map(|c| c.flag()))
            .finish()
    }
}

impl CapabilityRegistry {
    /// Registry with the built-in contributors
    pub fn new() -> Self {
        Self {
            contributors: builtin_capabilities(),
        }
    }

    /// Registry with no contributors
    pub fn empty() -> Self {
        Self {
            contributors: Vec::new(),
        }
    }

    /// Add a contributor; later contributors win on key collisions
    pub fn register(&mut self, contributor: Box<dyn CapabilityProps>) {
        self.contributors.push(contributor);
    }

    /// Flags with a registered contributor
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.contributors.iter().map(|c| c.flag())
    }

    /// Run every contributor whose flag the descriptor carries
    pub fn contribute(&self, ctx: &mut TypeContext, descriptor: &TypeDescriptor, schema: &mut PropsSchema) {
        for contributor in &self.contributors {
            if descriptor.capabilities.has(contributor.flag()) {
                tracing::trace!(ty = %descriptor.name, flag = contributor.flag(), "capability props");
                contributor.contribute(ctx, descriptor, schema);
            }
        }
    }
}
