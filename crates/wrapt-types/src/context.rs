//! Type context for managing types and type interning

use super::error::TypeError;
use super::ty::{
    ArrayType, ClassType, FunctionType, InstanceType, ObjectType, PrimitiveType,
    PropertySignature, TupleType, Type, TypeId, TypeReference, UnionType,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Rendering stops descending past this depth
const MAX_RENDER_DEPTH: usize = 32;

/// Where a type is being rendered, which decides whether it needs parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Position {
    Top,
    UnionMember,
    ArrayElement,
}

/// Type context that manages all types known to a derivation
///
/// This uses type interning to ensure that identical types have the same TypeId,
/// which enables cheap equality checks and makes derived schemas comparable.
#[derive(Debug, Clone)]
pub struct TypeContext {
    /// Storage for all types, indexed by TypeId
    types: Vec<Arc<Type>>,

    /// Reverse mapping from Type to TypeId for interning
    type_to_id: FxHashMap<Type, TypeId>,

    /// Named type definitions (classes, aliases)
    named_types: FxHashMap<String, TypeId>,

    /// Bumped whenever an existing id is given a new type
    generation: u64,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    /// Create a new context with the primitive types pre-interned
    pub fn new() -> Self {
        let mut ctx = TypeContext {
            types: Vec::new(),
            type_to_id: FxHashMap::default(),
            named_types: FxHashMap::default(),
            generation: 0,
        };

        ctx.intern(Type::Primitive(PrimitiveType::Number));
        ctx.intern(Type::Primitive(PrimitiveType::String));
        ctx.intern(Type::Primitive(PrimitiveType::Boolean));
        ctx.intern(Type::Primitive(PrimitiveType::Null));
        ctx.intern(Type::Primitive(PrimitiveType::Void));
        ctx.intern(Type::Never);
        ctx.intern(Type::Unknown);

        ctx
    }

    /// Intern a type, returning its TypeId
    ///
    /// If the type already exists, returns the existing TypeId.
    /// Otherwise, allocates a new TypeId and stores the type.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.type_to_id.get(&ty) {
            return id;
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(Arc::new(ty.clone()));
        self.type_to_id.insert(ty, id);
        id
    }

    /// Replace the type at an existing TypeId in-place.
    ///
    /// Self-referential classes are built by interning a placeholder first,
    /// resolving member types against the placeholder id, then replacing the
    /// placeholder with the full class.
    pub fn replace_type(&mut self, id: TypeId, new_ty: Type) {
        let idx = id.0 as usize;
        if idx < self.types.len() {
            let old_ty = (*self.types[idx]).clone();
            self.type_to_id.remove(&old_ty);
            self.types[idx] = Arc::new(new_ty.clone());
            self.type_to_id.insert(new_ty, id);
            self.generation += 1;
        }
    }

    /// Number of in-place replacements so far
    ///
    /// Anything keyed by [`TypeId`] outside the context is stale once this
    /// changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get a type by its TypeId
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0 as usize).map(|arc| arc.as_ref())
    }

    /// Get a type by its TypeId, or an error for a dangling id
    pub fn resolve(&self, id: TypeId) -> Result<&Type, TypeError> {
        self.get(id).ok_or(TypeError::InvalidTypeId { id })
    }

    /// Register a named type
    pub fn register_named_type(&mut self, name: impl Into<String>, ty: TypeId) {
        self.named_types.insert(name.into(), ty);
    }

    /// Look up a named type by name
    pub fn lookup_named_type(&self, name: &str) -> Option<TypeId> {
        self.named_types.get(name).copied()
    }

    /// Resolve a named type, returning an error if not found
    pub fn resolve_named_type(&self, name: &str) -> Result<TypeId, TypeError> {
        self.lookup_named_type(name).ok_or_else(|| TypeError::UndefinedType {
            name: name.to_string(),
        })
    }

    // Convenience methods for creating common types

    /// Get the number type
    pub fn number_type(&mut self) -> TypeId {
        self.intern(Type::Primitive(PrimitiveType::Number))
    }

    /// Get the string type
    pub fn string_type(&mut self) -> TypeId {
        self.intern(Type::Primitive(PrimitiveType::String))
    }

    /// Get the boolean type
    pub fn boolean_type(&mut self) -> TypeId {
        self.intern(Type::Primitive(PrimitiveType::Boolean))
    }

    /// Get the null type
    pub fn null_type(&mut self) -> TypeId {
        self.intern(Type::Primitive(PrimitiveType::Null))
    }

    /// Get the void type
    pub fn void_type(&mut self) -> TypeId {
        self.intern(Type::Primitive(PrimitiveType::Void))
    }

    /// Get the never type
    pub fn never_type(&mut self) -> TypeId {
        self.intern(Type::Never)
    }

    /// Get the unknown type
    pub fn unknown_type(&mut self) -> TypeId {
        self.intern(Type::Unknown)
    }

    /// Create a string literal type
    pub fn string_literal(&mut self, value: impl Into<String>) -> TypeId {
        self.intern(Type::StringLiteral(value.into()))
    }

    /// Create a boolean literal type
    pub fn boolean_literal(&mut self, value: bool) -> TypeId {
        self.intern(Type::BooleanLiteral(value))
    }

    /// Create an opaque named reference
    pub fn reference_type(&mut self, name: impl Into<String>) -> TypeId {
        self.intern(Type::Reference(TypeReference { name: name.into() }))
    }

    /// Create an object type from a list of properties
    pub fn object_type(&mut self, properties: Vec<PropertySignature>) -> TypeId {
        self.intern(Type::Object(ObjectType { properties }))
    }

    /// Create an array type
    pub fn array_type(&mut self, element: TypeId) -> TypeId {
        self.intern(Type::Array(ArrayType { element }))
    }

    /// Create a tuple type
    pub fn tuple_type(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(Type::Tuple(TupleType { elements }))
    }

    /// Create a function type
    pub fn function_type(&mut self, params: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern(Type::Function(FunctionType {
            params,
            return_type,
        }))
    }

    /// Intern a class type and register it under its name
    pub fn class_type(&mut self, class: ClassType) -> TypeId {
        let name = class.name.clone();
        let id = self.intern(Type::Class(class));
        self.register_named_type(name, id);
        id
    }

    /// Create the instance type of a class
    pub fn instance_type(&mut self, class: TypeId) -> TypeId {
        self.intern(Type::Instance(InstanceType { class }))
    }

    /// Create a union type
    ///
    /// Nested unions are flattened and duplicates removed, keeping the order
    /// members were first seen in. An empty union is `never` and a single
    /// member union is just the member.
    pub fn union_type(&mut self, members: Vec<TypeId>) -> TypeId {
        let mut seen = FxHashSet::default();
        let mut normalized = Vec::with_capacity(members.len());
        for member in members {
            let flattened = match self.get(member) {
                Some(Type::Union(u)) => u.members.clone(),
                _ => vec![member],
            };
            for id in flattened {
                if seen.insert(id) {
                    normalized.push(id);
                }
            }
        }

        match normalized.len() {
            0 => self.never_type(),
            1 => normalized[0],
            _ => self.intern(Type::Union(UnionType {
                members: normalized,
            })),
        }
    }

    /// Find the type of a named property on an object, instance or class
    ///
    /// Instance and class lookups walk the `extends` chain; a cyclic chain is
    /// walked once.
    pub fn property_type(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        match self.get(ty)? {
            Type::Object(obj) => obj.properties.iter().find(|p| p.name == name).map(|p| p.ty),
            Type::Instance(inst) => self.class_member(inst.class, name, false),
            Type::Class(_) => self.class_member(ty, name, false),
            _ => None,
        }
    }

    /// Find the type of a named property or method on an object, instance or class
    pub fn member_type(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        match self.get(ty)? {
            Type::Object(obj) => obj.properties.iter().find(|p| p.name == name).map(|p| p.ty),
            Type::Instance(inst) => self.class_member(inst.class, name, true),
            Type::Class(_) => self.class_member(ty, name, true),
            _ => None,
        }
    }

    fn class_member(&self, class: TypeId, name: &str, include_methods: bool) -> Option<TypeId> {
        let mut visited = FxHashSet::default();
        let mut current = Some(class);
        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            let Some(Type::Class(c)) = self.get(id) else {
                break;
            };
            if let Some(prop) = c.properties.iter().find(|p| p.name == name) {
                return Some(prop.ty);
            }
            if include_methods {
                if let Some(method) = c.methods.iter().find(|m| m.name == name) {
                    return Some(method.ty);
                }
            }
            current = c.extends;
        }
        None
    }

    /// Render a type, resolving nested ids: `[number, number] | number`
    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.render_into(id, Position::Top, 0, &mut out);
        out
    }

    fn render_into(&self, id: TypeId, pos: Position, depth: usize, out: &mut String) {
        if depth > MAX_RENDER_DEPTH {
            out.push_str("...");
            return;
        }
        let Some(ty) = self.get(id) else {
            out.push_str(&format!("InvalidType({})", id.0));
            return;
        };

        match ty {
            Type::Union(u) => {
                let wrap = pos > Position::UnionMember;
                if wrap {
                    out.push('(');
                }
                for (i, &member) in u.members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    self.render_into(member, Position::UnionMember, depth + 1, out);
                }
                if wrap {
                    out.push(')');
                }
            }
            Type::Function(func) => {
                let wrap = pos > Position::Top;
                if wrap {
                    out.push('(');
                }
                out.push('(');
                for (i, &param) in func.params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render_into(param, Position::Top, depth + 1, out);
                }
                out.push_str(") => ");
                self.render_into(func.return_type, Position::Top, depth + 1, out);
                if wrap {
                    out.push(')');
                }
            }
            Type::Array(a) => {
                self.render_into(a.element, Position::ArrayElement, depth + 1, out);
                out.push_str("[]");
            }
            Type::Tuple(t) => {
                out.push('[');
                for (i, &elem) in t.elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render_into(elem, Position::Top, depth + 1, out);
                }
                out.push(']');
            }
            Type::Object(o) => {
                if o.properties.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{ ");
                for (i, prop) in o.properties.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if prop.readonly {
                        out.push_str("readonly ");
                    }
                    out.push_str(&prop.name);
                    if prop.optional {
                        out.push('?');
                    }
                    out.push_str(": ");
                    self.render_into(prop.ty, Position::Top, depth + 1, out);
                }
                out.push_str(" }");
            }
            Type::Instance(inst) => match self.get(inst.class) {
                Some(Type::Class(c)) => out.push_str(&c.name),
                _ => out.push_str(&format!("InstanceType<{}>", inst.class)),
            },
            Type::Class(c) => {
                out.push_str("typeof ");
                out.push_str(&c.name);
            }
            Type::Primitive(p) => out.push_str(&p.to_string()),
            Type::Reference(r) => out.push_str(&r.name),
            Type::StringLiteral(s) => out.push_str(&format!("\"{}\"", s)),
            Type::BooleanLiteral(b) => out.push_str(if *b { "true" } else { "false" }),
            Type::Never => out.push_str("never"),
            Type::Unknown => out.push_str("unknown"),
        }
    }

    /// Get the number of types in the context
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::MethodSignature;

    #[test]
    fn test_type_interning() {
        let mut ctx = TypeContext::new();

        let num1 = ctx.number_type();
        let num2 = ctx.number_type();

        assert_eq!(num1, num2);
    }

    #[test]
    fn test_primitive_types() {
        let mut ctx = TypeContext::new();

        let num = ctx.number_type();
        let str = ctx.string_type();
        let bool = ctx.boolean_type();

        assert_eq!(ctx.get(num), Some(&Type::Primitive(PrimitiveType::Number)));
        assert_eq!(ctx.get(str), Some(&Type::Primitive(PrimitiveType::String)));
        assert_eq!(ctx.get(bool), Some(&Type::Primitive(PrimitiveType::Boolean)));
    }

    #[test]
    fn test_union_flattening() {
        let mut ctx = TypeContext::new();

        let num = ctx.number_type();
        let str = ctx.string_type();
        let bool = ctx.boolean_type();

        let union1 = ctx.union_type(vec![num, str]);
        let union2 = ctx.union_type(vec![union1, bool]);

        match ctx.get(union2) {
            Some(Type::Union(u)) => assert_eq!(u.members, vec![num, str, bool]),
            _ => panic!("Expected union type"),
        }
    }

    #[test]
    fn test_union_deduplication_keeps_order() {
        let mut ctx = TypeContext::new();

        let num = ctx.number_type();
        let str = ctx.string_type();

        let union = ctx.union_type(vec![str, num, str]);

        match ctx.get(union) {
            Some(Type::Union(u)) => assert_eq!(u.members, vec![str, num]),
            _ => panic!("Expected union type"),
        }
    }

    #[test]
    fn test_single_and_empty_union() {
        let mut ctx = TypeContext::new();

        let num = ctx.number_type();
        assert_eq!(ctx.union_type(vec![num]), num);

        let never = ctx.never_type();
        assert_eq!(ctx.union_type(vec![]), never);
    }

    #[test]
    fn test_class_registered_by_name() {
        let mut ctx = TypeContext::new();

        let class = ctx.class_type(ClassType::new("Group"));
        assert_eq!(ctx.lookup_named_type("Group"), Some(class));
        assert!(ctx.resolve_named_type("Missing").is_err());
    }

    #[test]
    fn test_resolve_dangling_id() {
        let ctx = TypeContext::new();
        let dangling = TypeId::new(9_999);
        assert_eq!(
            ctx.resolve(dangling),
            Err(TypeError::InvalidTypeId { id: dangling })
        );
    }

    #[test]
    fn test_member_lookup_walks_extends() {
        let mut ctx = TypeContext::new();
        let num = ctx.number_type();
        let void = ctx.void_type();
        let update = ctx.function_type(vec![], void);

        let mut base = ClassType::new("Base");
        base.properties.push(PropertySignature::new("opacity", num));
        base.methods.push(MethodSignature::new("update", update));
        let base = ctx.class_type(base);

        let mut derived = ClassType::new("Derived");
        derived.extends = Some(base);
        let derived = ctx.class_type(derived);
        let instance = ctx.instance_type(derived);

        assert_eq!(ctx.property_type(instance, "opacity"), Some(num));
        assert_eq!(ctx.property_type(instance, "update"), None);
        assert_eq!(ctx.member_type(instance, "update"), Some(update));
    }

    #[test]
    fn test_member_lookup_survives_cycle() {
        let mut ctx = TypeContext::new();
        let placeholder = ctx.class_type(ClassType::new("Loop"));

        let mut looped = ClassType::new("Loop");
        looped.extends = Some(placeholder);
        ctx.replace_type(placeholder, Type::Class(looped));

        assert_eq!(ctx.property_type(placeholder, "anything"), None);
    }

    #[test]
    fn test_display_nested() {
        let mut ctx = TypeContext::new();
        let num = ctx.number_type();
        let void = ctx.void_type();

        let tuple = ctx.tuple_type(vec![num, num, num]);
        let union = ctx.union_type(vec![tuple, num]);
        assert_eq!(ctx.display(union), "[number, number, number] | number");

        let teardown = ctx.function_type(vec![], void);
        let ret = ctx.union_type(vec![teardown, void]);
        assert_eq!(ctx.display(ret), "(() => void) | void");

        let str = ctx.string_type();
        let arr_elem = ctx.union_type(vec![num, str]);
        let arr = ctx.array_type(arr_elem);
        assert_eq!(ctx.display(arr), "(number | string)[]");
    }

    #[test]
    fn test_display_leaves() {
        let mut ctx = TypeContext::new();
        let tag = ctx.string_literal("added");
        let yes = ctx.boolean_literal(true);
        let matrix = ctx.reference_type("Matrix4");
        let never = ctx.never_type();
        let null = ctx.null_type();
        let union = ctx.union_type(vec![tag, yes, matrix, null]);

        assert_eq!(ctx.display(union), "\"added\" | true | Matrix4 | null");
        assert_eq!(ctx.display(never), "never");
        assert_eq!(ctx.display(TypeId::new(9_999)), "InvalidType(9999)");
    }

    #[test]
    fn test_replace_bumps_generation() {
        let mut ctx = TypeContext::new();
        let class = ctx.class_type(ClassType::new("Node"));
        let start = ctx.generation();

        ctx.number_type();
        ctx.class_type(ClassType::new("Other"));
        assert_eq!(ctx.generation(), start);

        ctx.replace_type(class, Type::Class(ClassType::new("Node")));
        assert_eq!(ctx.generation(), start + 1);

        ctx.replace_type(TypeId::new(9_999), Type::Never);
        assert_eq!(ctx.generation(), start + 1);
    }

    #[test]
    fn test_display_object_and_instance() {
        let mut ctx = TypeContext::new();
        let class = ctx.class_type(ClassType::new("Mesh"));
        let instance = ctx.instance_type(class);

        let obj = ctx.object_type(vec![PropertySignature::new("ref", instance)]);
        assert_eq!(ctx.display(obj), "{ ref: Mesh }");
        assert_eq!(ctx.display(class), "typeof Mesh");

        let empty = ctx.object_type(vec![]);
        assert_eq!(ctx.display(empty), "{}");
    }
}
