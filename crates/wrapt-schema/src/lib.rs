//! Wrapt Schema Derivation
//!
//! Derives the authoring surface of a generic wrapping component from the
//! structure of the wrapped type:
//!
//! - [`derive_props`]: settable properties (`attach`, `dispose`, `ref`,
//!   `args`, capability-gated keys, instance fields)
//! - [`derive_slots`]: the `default` slot
//! - [`derive_events`]: the instance's discriminated events plus `create`
//!
//! Each builder is a pure function of a [`TypeDescriptor`]. Descriptors come
//! from a [`DescriptorExtractor`] reading a [`TypeContext`], or are built by
//! hand. [`Deriver`] ties the pieces together and caches per type.
//!
//! # Usage
//!
//! ```ignore
//! use wrapt_schema::Deriver;
//! use wrapt_types::TypeContext;
//!
//! let mut ctx = TypeContext::new();
//! let camera = /* register PerspectiveCamera in ctx */;
//!
//! let mut deriver = Deriver::new();
//! let derived = deriver.derive(&mut ctx, camera)?;
//! println!("{}", derived.props.render(&ctx));
//! ```
//!
//! [`TypeContext`]: wrapt_types::TypeContext

#![warn(missing_docs)]

pub mod capability;
pub mod config;
pub mod descriptor;
pub mod deriver;
pub mod error;
pub mod events;
pub mod exclusion;
pub mod extract;
pub mod props;
pub mod schema;
pub mod slots;

pub use capability::{CameraProps, CapabilityProps, CapabilityRegistry};
pub use config::{ConfigError, SchemaConfig};
pub use descriptor::{Capabilities, EventDispatch, FieldDescriptor, TypeDescriptor, CAMERA_FLAG};
pub use deriver::{DerivedSchemas, Deriver};
pub use error::SchemaError;
pub use events::{derive_events, derive_events_with};
pub use exclusion::ExclusionPolicy;
pub use extract::DescriptorExtractor;
pub use props::{derive_props, PropsBuilder};
pub use schema::{Contribution, EventsSchema, PropsSchema, Schema, SchemaEntry, SlotsSchema};
pub use slots::derive_slots;
