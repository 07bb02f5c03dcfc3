//! Core type definitions for the wrapt type vocabulary

use std::fmt;

/// Unique identifier for a type in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Create a TypeId from a raw value
    ///
    /// Prefer the TypeContext constructors; a raw id may not belong to any
    /// context.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The `number` type
    Number,
    /// The `string` type
    String,
    /// The `boolean` type
    Boolean,
    /// The `null` type
    Null,
    /// The `void` type (for functions with no return value)
    Void,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Void => write!(f, "void"),
        }
    }
}

/// Reference to an opaque named type the context knows nothing else about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    /// Name of the referenced type
    pub name: String,
}

/// Union type: T1 | T2 | ... | Tn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionType {
    /// Members of the union, in first-seen order
    pub members: Vec<TypeId>,
}

/// Function type: (T1, T2, ..., Tn) => R
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    /// Parameter types
    pub params: Vec<TypeId>,
    /// Return type
    pub return_type: TypeId,
}

/// Array type: T[]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// Element type
    pub element: TypeId,
}

/// Tuple type: [T1, T2, ..., Tn]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
    /// Element types
    pub elements: Vec<TypeId>,
}

/// Object type property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertySignature {
    /// Property name
    pub name: String,
    /// Property type
    pub ty: TypeId,
    /// Whether the property is optional
    pub optional: bool,
    /// Whether the property is readonly
    pub readonly: bool,
}

impl PropertySignature {
    /// A required, mutable property
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            readonly: false,
        }
    }

    /// Mark the property as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the property as readonly
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Object type: { prop1: T1, prop2: T2, ... }
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    /// Object properties
    pub properties: Vec<PropertySignature>,
}

/// Method signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// Method name
    pub name: String,
    /// Method type (should be a FunctionType)
    pub ty: TypeId,
}

impl MethodSignature {
    /// Create a method signature
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Class type (the constructible side of a wrapped type)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    /// Class name
    pub name: String,
    /// Instance properties
    pub properties: Vec<PropertySignature>,
    /// Instance methods
    pub methods: Vec<MethodSignature>,
    /// Constructor parameter types, `None` when the signature is not known
    pub constructor: Option<Vec<TypeId>>,
    /// Parent class (if any)
    pub extends: Option<TypeId>,
}

impl ClassType {
    /// Create an empty class with an unknown constructor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructor: None,
            extends: None,
        }
    }
}

/// Instance type: the value produced by constructing a class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceType {
    /// The class this is an instance of
    pub class: TypeId,
}

/// The core type representation
///
/// Nested types are ids into a [`TypeContext`](crate::TypeContext); render
/// one with [`TypeContext::display`](crate::TypeContext::display).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Primitive type (number, string, boolean, null, void)
    Primitive(PrimitiveType),

    /// Opaque named type
    Reference(TypeReference),

    /// Union type: T1 | T2 | ... | Tn
    Union(UnionType),

    /// Function type: (params) => return
    Function(FunctionType),

    /// Array type: T[]
    Array(ArrayType),

    /// Tuple type: [T1, T2, ..., Tn]
    Tuple(TupleType),

    /// Object type: { prop: T }
    Object(ObjectType),

    /// Class type (constructible)
    Class(ClassType),

    /// Instance of a class
    Instance(InstanceType),

    /// String literal type: "hello"
    StringLiteral(String),

    /// Boolean literal type: true, false
    BooleanLiteral(bool),

    /// Bottom type
    Never,

    /// Top type
    Unknown,
}

impl Type {
    /// Check if this type is a function type
    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    /// Get the function type if this is a function
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get the string value if this is a string literal
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Type::StringLiteral(s) => Some(s),
            _ => None,
        }
    }
}
