//! Structural descriptors of wrapped types
//!
//! A [`TypeDescriptor`] is everything the schema builders know about a
//! wrapped type. It is produced once by the
//! [`DescriptorExtractor`](crate::extract::DescriptorExtractor) (or built by
//! hand) and never mutated afterwards.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use wrapt_types::TypeId;

/// Marker flag set on cameras
pub const CAMERA_FLAG: &str = "isCamera";

/// Description of a single field of the wrapped instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field's declared value type
    pub value_type: TypeId,
    /// Methods and function-typed properties
    pub is_function_valued: bool,
    /// Parameter types of the value's `set(...)` operation, if it has one
    pub set_method: Option<Vec<TypeId>>,
}

impl FieldDescriptor {
    /// A plain data field
    pub fn value(value_type: TypeId) -> Self {
        Self {
            value_type,
            is_function_valued: false,
            set_method: None,
        }
    }

    /// A method or function-typed property
    pub fn function(value_type: TypeId) -> Self {
        Self {
            value_type,
            is_function_valued: true,
            set_method: None,
        }
    }

    /// A field whose value exposes `set(params...)`
    pub fn settable(value_type: TypeId, params: Vec<TypeId>) -> Self {
        Self {
            value_type,
            is_function_valued: false,
            set_method: Some(params),
        }
    }
}

/// Native event mechanism of the wrapped instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDispatch {
    /// Every event name the dispatcher accepts, in declaration order
    pub event_names: Vec<String>,
    /// Type of the argument the handler receives
    pub handler_event: TypeId,
}

/// Capability flags of a wrapped type
///
/// `flags` is open-ended: every `is<Name>: true` marker found on the
/// instance is recorded whether or not any contribution keys off it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Marker names such as `isCamera`, `isObject3D`
    pub flags: BTreeSet<String>,
    /// Present when the instance can dispatch discriminated events
    pub event_dispatch: Option<EventDispatch>,
}

impl Capabilities {
    /// No capabilities at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether a marker flag is set
    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Whether the camera marker is set
    pub fn is_camera(&self) -> bool {
        self.has(CAMERA_FLAG)
    }

    /// Whether the instance supports event dispatch
    pub fn supports_event_dispatch(&self) -> bool {
        self.event_dispatch.is_some()
    }

    /// Add a marker flag
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Attach an event dispatch description
    pub fn with_event_dispatch(mut self, dispatch: EventDispatch) -> Self {
        self.event_dispatch = Some(dispatch);
        self
    }
}

/// Structural description of a wrapped type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Display name of the wrapped type
    pub name: String,
    /// The instance type (what `ref` hands back)
    pub instance: TypeId,
    /// Whether the wrapped type is constructible
    pub is_class: bool,
    /// Constructor parameters; `None` when constructible with an unknown signature
    pub constructor_params: Option<Vec<TypeId>>,
    /// Instance fields in declaration order
    pub fields: IndexMap<String, FieldDescriptor>,
    /// Capability flags
    pub capabilities: Capabilities,
}

impl TypeDescriptor {
    /// Descriptor for a type with no field structure (a primitive value type)
    pub fn primitive(name: impl Into<String>, instance: TypeId) -> Self {
        Self {
            name: name.into(),
            instance,
            is_class: false,
            constructor_params: None,
            fields: IndexMap::new(),
            capabilities: Capabilities::none(),
        }
    }

    /// Descriptor for a constructible type with the given constructor parameters
    pub fn class(name: impl Into<String>, instance: TypeId, params: Vec<TypeId>) -> Self {
        Self {
            is_class: true,
            constructor_params: Some(params),
            ..Self::primitive(name, instance)
        }
    }

    /// Add a field, replacing an existing one of the same name in place
    pub fn with_field(mut self, name: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Replace the capabilities
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
