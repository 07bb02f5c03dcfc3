//! Slots schema builder

use wrapt_types::{PropertySignature, TypeContext};

use crate::descriptor::TypeDescriptor;
use crate::schema::{Contribution, SchemaEntry, SlotsSchema};

/// `{ default: { ref: Instance } }`
pub fn derive_slots(ctx: &mut TypeContext, descriptor: &TypeDescriptor) -> SlotsSchema {
    let payload = ctx.object_type(vec![PropertySignature::new("ref", descriptor.instance)]);

    let mut schema = SlotsSchema::new();
    schema.insert("default", SchemaEntry::required(payload, Contribution::Slot));
    schema
}
