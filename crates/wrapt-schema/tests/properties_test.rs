//! Invariants of derivation over arbitrary descriptors

use proptest::prelude::*;
use wrapt_schema::exclusion::FIXED_EXCLUDED_KEYS;
use wrapt_schema::{
    Capabilities, Contribution, Deriver, ExclusionPolicy, FieldDescriptor, TypeDescriptor,
    CAMERA_FLAG,
};
use wrapt_types::TypeContext;

#[derive(Debug, Clone)]
enum FieldKind {
    Value,
    Function,
    Settable(usize),
}

#[derive(Debug, Clone)]
struct Shape {
    fields: Vec<(String, FieldKind)>,
    camera: bool,
    constructor: Option<usize>,
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(FIXED_EXCLUDED_KEYS.to_vec()).prop_map(String::from),
        "is[A-Z][a-zA-Z0-9]{0,6}",
        "[a-z][a-zA-Z0-9]{0,8}",
    ]
}

fn arb_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Value),
        Just(FieldKind::Function),
        (0usize..4).prop_map(FieldKind::Settable),
    ]
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (
        prop::collection::vec((arb_name(), arb_kind()), 0..16),
        any::<bool>(),
        prop::option::of(0usize..5),
    )
        .prop_map(|(fields, camera, constructor)| Shape {
            fields,
            camera,
            constructor,
        })
}

fn build(ctx: &mut TypeContext, shape: &Shape) -> TypeDescriptor {
    let num = ctx.number_type();
    let unknown = ctx.unknown_type();
    let void = ctx.void_type();
    let callback = ctx.function_type(vec![], void);

    let mut descriptor = match shape.constructor {
        Some(arity) => TypeDescriptor::class("Generated", unknown, vec![num; arity]),
        None => TypeDescriptor::primitive("Generated", unknown),
    };
    if shape.camera {
        descriptor = descriptor.with_capabilities(Capabilities::none().with_flag(CAMERA_FLAG));
    }
    for (name, kind) in &shape.fields {
        let field = match kind {
            FieldKind::Value => FieldDescriptor::value(num),
            FieldKind::Function => FieldDescriptor::function(callback),
            FieldKind::Settable(arity) => FieldDescriptor::settable(unknown, vec![num; *arity]),
        };
        descriptor = descriptor.with_field(name.clone(), field);
    }
    descriptor
}

proptest! {
    #[test]
    fn prop_instance_keys_respect_policy(shape in arb_shape()) {
        let mut ctx = TypeContext::new();
        let descriptor = build(&mut ctx, &shape);
        let derived = Deriver::new().derive_descriptor(&mut ctx, descriptor.clone());
        let policy = ExclusionPolicy::new();

        for key in derived.props.keys_from(&Contribution::Instance) {
            prop_assert!(!policy.is_excluded(key), "{} should have been excluded", key);
            prop_assert!(!descriptor.fields[key].is_function_valued);
        }
        for (name, field) in &descriptor.fields {
            if field.is_function_valued || policy.is_excluded(name) {
                let source = derived.props.get(name).map(|entry| &entry.source);
                prop_assert_ne!(source, Some(&Contribution::Instance));
            }
        }
    }

    #[test]
    fn prop_gated_contributions(shape in arb_shape()) {
        let mut ctx = TypeContext::new();
        let descriptor = build(&mut ctx, &shape);
        let derived = Deriver::new().derive_descriptor(&mut ctx, descriptor);
        let props = &derived.props;

        prop_assert_eq!(props.contains_key("manual"), shape.camera);
        prop_assert_eq!(props.contains_key("makeDefault"), shape.camera);
        prop_assert_eq!(props.contains_key("args"), shape.constructor.is_some());

        if let Some(arity) = shape.constructor {
            let num = ctx.number_type();
            let expected = ctx.tuple_type(vec![num; arity]);
            prop_assert_eq!(props.get("args").map(|entry| entry.ty), Some(expected));
        }

        for key in ["attach", "dispose", "ref"] {
            prop_assert!(props.contains_key(key));
        }
        prop_assert!(props.is_open());
        prop_assert!(props.iter().all(|(_, entry)| entry.optional));
    }

    #[test]
    fn prop_slots_and_create_always_present(shape in arb_shape()) {
        let mut ctx = TypeContext::new();
        let descriptor = build(&mut ctx, &shape);
        let derived = Deriver::new().derive_descriptor(&mut ctx, descriptor);

        prop_assert_eq!(derived.slots.keys().collect::<Vec<_>>(), vec!["default"]);
        prop_assert_eq!(derived.events.keys().last(), Some("create"));
        prop_assert!(derived.events.is_open());
    }

    #[test]
    fn prop_derivation_is_deterministic(shape in arb_shape()) {
        let mut ctx = TypeContext::new();
        let descriptor = build(&mut ctx, &shape);
        let deriver = Deriver::new();

        let first = deriver.derive_descriptor(&mut ctx, descriptor.clone());
        let second = deriver.derive_descriptor(&mut ctx, descriptor);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.props.render(&ctx), second.props.render(&ctx));
    }
}
