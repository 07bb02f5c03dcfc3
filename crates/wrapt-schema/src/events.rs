//! Events schema builder
//!
//! When the wrapped instance can dispatch events, every event name it accepts
//! becomes a key whose payload is the handler's event type narrowed to the
//! variant tagged with that name. The synthetic `create` event is added for
//! every type, so consumers can register teardown logic even without a
//! native event mechanism.

use tracing::trace;
use wrapt_types::{narrow_by_discriminant, PropertySignature, TypeContext, TypeId};

use crate::descriptor::TypeDescriptor;
use crate::schema::{Contribution, EventsSchema, SchemaEntry};

/// Field that links a payload to its event name unless configured otherwise
pub const DEFAULT_DISCRIMINANT: &str = "type";

/// Derive the events schema, discriminating payloads on `type`
pub fn derive_events(ctx: &mut TypeContext, descriptor: &TypeDescriptor) -> EventsSchema {
    derive_events_with(ctx, descriptor, DEFAULT_DISCRIMINANT)
}

/// Derive the events schema, discriminating payloads on `discriminant_field`
pub fn derive_events_with(
    ctx: &mut TypeContext,
    descriptor: &TypeDescriptor,
    discriminant_field: &str,
) -> EventsSchema {
    let mut schema = EventsSchema::open();

    if let Some(dispatch) = &descriptor.capabilities.event_dispatch {
        for name in &dispatch.event_names {
            let payload =
                narrow_by_discriminant(ctx, dispatch.handler_event, discriminant_field, name);
            trace!(ty = %descriptor.name, event = %name, payload = %ctx.display(payload), "native event");
            schema.insert(name.clone(), SchemaEntry::required(payload, Contribution::NativeEvent));
        }
    }

    let create = create_payload(ctx, descriptor.instance);
    schema.insert("create", SchemaEntry::required(create, Contribution::Lifecycle));

    schema
}

/// `{ ref: Instance, cleanup: (callback: () => void) => void }`
fn create_payload(ctx: &mut TypeContext, instance: TypeId) -> TypeId {
    let void = ctx.void_type();
    let callback = ctx.function_type(vec![], void);
    let cleanup = ctx.function_type(vec![callback], void);
    ctx.object_type(vec![
        PropertySignature::new("ref", instance),
        PropertySignature::new("cleanup", cleanup),
    ])
}
