//! Per-type derivation with caching
//!
//! A [`Deriver`] owns the configured extractor, exclusion policy and
//! capability registry, and derives each distinct wrapped type once. Cache
//! keys are [`TypeId`]s, so a deriver must stay paired with one
//! [`TypeContext`]. The cache is dropped whenever the context reports that an
//! existing id was replaced.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;
use wrapt_types::{TypeContext, TypeId};

use crate::capability::{CapabilityProps, CapabilityRegistry};
use crate::config::SchemaConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::SchemaError;
use crate::events::{derive_events_with, DEFAULT_DISCRIMINANT};
use crate::exclusion::ExclusionPolicy;
use crate::extract::DescriptorExtractor;
use crate::props::PropsBuilder;
use crate::schema::{EventsSchema, PropsSchema, SlotsSchema};
use crate::slots::derive_slots;

/// Everything derived for one wrapped type
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSchemas {
    /// The descriptor the schemas were derived from
    pub descriptor: TypeDescriptor,
    /// Settable properties
    pub props: PropsSchema,
    /// Slots
    pub slots: SlotsSchema,
    /// Events
    pub events: EventsSchema,
}

/// Configured derivation pipeline
#[derive(Debug)]
pub struct Deriver {
    extractor: DescriptorExtractor,
    policy: ExclusionPolicy,
    capabilities: CapabilityRegistry,
    discriminant_field: String,
    cache: FxHashMap<TypeId, Arc<DerivedSchemas>>,
    cache_generation: u64,
}

impl Default for Deriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Deriver {
    /// Deriver with the built-in policy and capabilities
    pub fn new() -> Self {
        Self {
            extractor: DescriptorExtractor::new(),
            policy: ExclusionPolicy::new(),
            capabilities: CapabilityRegistry::new(),
            discriminant_field: DEFAULT_DISCRIMINANT.to_string(),
            cache: FxHashMap::default(),
            cache_generation: 0,
        }
    }

    /// Deriver configured from a parsed configuration
    pub fn from_config(config: &SchemaConfig) -> Self {
        Self {
            extractor: DescriptorExtractor::with_config(config.introspection.clone()),
            policy: ExclusionPolicy::with_extra_keys(config.exclusion.extra_keys.iter().cloned()),
            capabilities: CapabilityRegistry::new(),
            discriminant_field: config.events.discriminant_field.clone(),
            cache: FxHashMap::default(),
            cache_generation: 0,
        }
    }

    /// Deriver configured from a TOML file
    pub fn from_config_file(path: &Path) -> Result<Self, SchemaError> {
        let config = SchemaConfig::from_file(path)?;
        Ok(Self::from_config(&config))
    }

    /// Add a capability contributor
    ///
    /// Cached results were derived without it and are dropped.
    pub fn register_capability(&mut self, contributor: Box<dyn CapabilityProps>) {
        self.capabilities.register(contributor);
        self.cache.clear();
    }

    /// Extract and derive all schemas for `ty`, reusing a cached result
    ///
    /// Cached results survive interning new types but not
    /// [`TypeContext::replace_type`] on any id.
    pub fn derive(&mut self, ctx: &mut TypeContext, ty: TypeId) -> Result<Arc<DerivedSchemas>, SchemaError> {
        if self.cache_generation != ctx.generation() {
            if !self.cache.is_empty() {
                debug!(entries = self.cache.len(), "context changed, dropping cached schemas");
            }
            self.cache.clear();
            self.cache_generation = ctx.generation();
        }
        if let Some(hit) = self.cache.get(&ty) {
            return Ok(Arc::clone(hit));
        }

        let descriptor = self.extractor.extract(ctx, ty)?;
        debug!(ty = %descriptor.name, id = %ty, "deriving schemas");
        let derived = Arc::new(self.derive_descriptor(ctx, descriptor));
        self.cache.insert(ty, Arc::clone(&derived));
        Ok(derived)
    }

    /// Derive all schemas for the class registered under `name`
    pub fn derive_named(&mut self, ctx: &mut TypeContext, name: &str) -> Result<Arc<DerivedSchemas>, SchemaError> {
        let ty = ctx.resolve_named_type(name)?;
        self.derive(ctx, ty)
    }

    /// Derive all schemas for a hand-built descriptor, bypassing the cache
    pub fn derive_descriptor(&self, ctx: &mut TypeContext, descriptor: TypeDescriptor) -> DerivedSchemas {
        let props = PropsBuilder::new(&self.policy, &self.capabilities).build(ctx, &descriptor);
        let slots = derive_slots(ctx, &descriptor);
        let events = derive_events_with(ctx, &descriptor, &self.discriminant_field);
        DerivedSchemas {
            descriptor,
            props,
            slots,
            events,
        }
    }

    /// Cached result for `ty`, if derived already
    pub fn cached(&self, ty: TypeId) -> Option<Arc<DerivedSchemas>> {
        self.cache.get(&ty).cloned()
    }

    /// Number of cached types
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached result
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
