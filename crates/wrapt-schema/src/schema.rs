//! Derived schema values
//!
//! All three derived schemas share one shape: an ordered map from key to
//! [`SchemaEntry`] plus a flag for the open `[key: string]: unknown` record.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use wrapt_types::{TypeContext, TypeId};

/// Which contribution produced a schema entry
///
/// For props the declaration order is the merge precedence: an entry from a
/// later contribution overrides an earlier one with the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Contribution {
    /// `attach`
    Base,
    /// `dispose`
    Disposable,
    /// `ref`
    Ref,
    /// `args`
    ClassArgs,
    /// Keys gated on a capability marker
    Capability(String),
    /// Fields of the wrapped instance
    Instance,
    /// Slot payloads
    Slot,
    /// Events from the instance's own dispatcher
    NativeEvent,
    /// The synthetic `create` event
    Lifecycle,
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contribution::Base => write!(f, "base"),
            Contribution::Disposable => write!(f, "disposable"),
            Contribution::Ref => write!(f, "ref"),
            Contribution::ClassArgs => write!(f, "class-args"),
            Contribution::Capability(flag) => write!(f, "capability({})", flag),
            Contribution::Instance => write!(f, "instance"),
            Contribution::Slot => write!(f, "slot"),
            Contribution::NativeEvent => write!(f, "native-event"),
            Contribution::Lifecycle => write!(f, "lifecycle"),
        }
    }
}

/// One key of a derived schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    /// Declared type
    pub ty: TypeId,
    /// Whether the key may be omitted
    pub optional: bool,
    /// Contribution the entry came from
    pub source: Contribution,
    /// Value the consumer assumes when the key is omitted
    pub default: Option<serde_json::Value>,
}

impl SchemaEntry {
    /// A required entry
    pub fn required(ty: TypeId, source: Contribution) -> Self {
        Self {
            ty,
            optional: false,
            source,
            default: None,
        }
    }

    /// An optional entry
    pub fn optional(ty: TypeId, source: Contribution) -> Self {
        Self {
            optional: true,
            ..Self::required(ty, source)
        }
    }

    /// Attach a conceptual default
    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Ordered key → entry map with an optional open record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
    passthrough: bool,
}

/// Settable properties of the wrapping component
pub type PropsSchema = Schema;

/// Child-rendering slots of the wrapping component
pub type SlotsSchema = Schema;

/// Events of the wrapping component
pub type EventsSchema = Schema;

impl Schema {
    /// An empty, closed schema
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty schema that also accepts arbitrary string keys
    pub fn open() -> Self {
        Self {
            entries: IndexMap::new(),
            passthrough: true,
        }
    }

    /// Insert an entry, returning the one it overrides
    ///
    /// An overridden key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, entry: SchemaEntry) -> Option<SchemaEntry> {
        self.entries.insert(key.into(), entry)
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key)
    }

    /// Whether a key is declared (the open record does not count)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Declared keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Declared entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys declared by one contribution
    pub fn keys_from<'a>(&'a self, source: &'a Contribution) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter(move |(_, entry)| &entry.source == source)
            .map(|(key, _)| key)
    }

    /// Number of declared keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether arbitrary extra string keys are accepted
    pub fn is_open(&self) -> bool {
        self.passthrough
    }

    /// Accept arbitrary extra string keys
    pub fn set_open(&mut self, open: bool) {
        self.passthrough = open;
    }

    /// Render as a TypeScript-like object type
    ///
    /// ```text
    /// {
    ///   ref?: PerspectiveCamera;
    ///   [key: string]: unknown;
    /// }
    /// ```
    pub fn render(&self, ctx: &TypeContext) -> String {
        if self.entries.is_empty() && !self.passthrough {
            return "{}".to_string();
        }
        let mut out = String::from("{\n");
        for (key, entry) in &self.entries {
            let marker = if entry.optional { "?" } else { "" };
            out.push_str(&format!("  {}{}: {};\n", key, marker, ctx.display(entry.ty)));
        }
        if self.passthrough {
            out.push_str("  [key: string]: unknown;\n");
        }
        out.push('}');
        out
    }

    /// Serializable view with rendered types
    pub fn to_document(&self, ctx: &TypeContext) -> SchemaDocument {
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| {
                (
                    key.clone(),
                    EntryDocument {
                        ty: ctx.display(entry.ty),
                        optional: entry.optional,
                        source: entry.source.to_string(),
                        default: entry.default.clone(),
                    },
                )
            })
            .collect();
        SchemaDocument {
            entries,
            passthrough: self.passthrough,
        }
    }

    /// Pretty JSON export, keys in declaration order
    pub fn to_json(&self, ctx: &TypeContext) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_document(ctx))
    }
}

/// JSON shape of a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    /// Declared keys
    pub entries: IndexMap<String, EntryDocument>,
    /// Whether arbitrary extra string keys are accepted
    pub passthrough: bool,
}

/// JSON shape of a schema entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDocument {
    /// Rendered type
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the key may be omitted
    pub optional: bool,
    /// Contribution name
    pub source: String,
    /// Conceptual default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}
