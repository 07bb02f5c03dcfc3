//! A small scene-graph class hierarchy for derivation tests
//!
//! EventDispatcher ← Object3D ← Camera ← PerspectiveCamera, plus Vector3 and
//! Color values that expose `set(...)`.

#![allow(dead_code)]

use wrapt_types::{
    ClassType, MethodSignature, PropertySignature, Type, TypeContext, TypeId,
};

/// Type ids of the fixture classes
pub struct Scene {
    pub ctx: TypeContext,
    pub vector3: TypeId,
    pub color: TypeId,
    pub added_event: TypeId,
    pub removed_event: TypeId,
    pub event_dispatcher: TypeId,
    pub object3d: TypeId,
    pub camera: TypeId,
    pub perspective_camera: TypeId,
}

fn prop(name: &str, ty: TypeId) -> PropertySignature {
    PropertySignature::new(name, ty)
}

fn method(name: &str, ty: TypeId) -> MethodSignature {
    MethodSignature::new(name, ty)
}

pub fn scene() -> Scene {
    let mut ctx = TypeContext::new();
    let num = ctx.number_type();
    let str = ctx.string_type();
    let bool = ctx.boolean_type();
    let void = ctx.void_type();
    let null = ctx.null_type();
    let yes = ctx.boolean_literal(true);

    // Vector3 { x, y, z; set(x, y, z): this; clone(): Vector3 }
    let vector3 = ctx.class_type(ClassType::new("Vector3"));
    let vector3_inst = ctx.instance_type(vector3);
    let vector3_set = ctx.function_type(vec![num, num, num], vector3_inst);
    let vector3_clone = ctx.function_type(vec![], vector3_inst);
    let mut class = ClassType::new("Vector3");
    class.properties = vec![prop("x", num), prop("y", num), prop("z", num)];
    class.methods = vec![method("set", vector3_set), method("clone", vector3_clone)];
    class.constructor = Some(vec![num, num, num]);
    ctx.replace_type(vector3, Type::Class(class));

    // Color { r, g, b; set(value: number | string): this }
    let color = ctx.class_type(ClassType::new("Color"));
    let color_inst = ctx.instance_type(color);
    let color_value = ctx.union_type(vec![num, str]);
    let color_set = ctx.function_type(vec![color_value], color_inst);
    let mut class = ClassType::new("Color");
    class.properties = vec![prop("r", num), prop("g", num), prop("b", num)];
    class.methods = vec![method("set", color_set)];
    ctx.replace_type(color, Type::Class(class));

    // Events tagged by `type`
    let added_tag = ctx.string_literal("added");
    let removed_tag = ctx.string_literal("removed");
    let added_event = ctx.object_type(vec![prop("type", added_tag)]);
    let removed_event = ctx.object_type(vec![prop("type", removed_tag), prop("target", num)]);
    let event = ctx.union_type(vec![added_event, removed_event]);
    let event_name = ctx.union_type(vec![added_tag, removed_tag]);
    let listener = ctx.function_type(vec![event], void);
    let add_listener = ctx.function_type(vec![event_name, listener], void);
    let dispatch = ctx.function_type(vec![event], void);

    let mut class = ClassType::new("EventDispatcher");
    class.methods = vec![
        method("addEventListener", add_listener),
        method("dispatchEvent", dispatch),
    ];
    class.constructor = Some(vec![]);
    let event_dispatcher = ctx.class_type(class);

    // Object3D extends EventDispatcher
    let object3d = ctx.class_type(ClassType::new("Object3D"));
    let object3d_inst = ctx.instance_type(object3d);
    let parent = ctx.union_type(vec![object3d_inst, null]);
    let children = ctx.array_type(object3d_inst);
    let on_before_render = ctx.function_type(vec![], void);
    let add = ctx.function_type(vec![object3d_inst], object3d_inst);
    let clone = ctx.function_type(vec![], object3d_inst);
    let mut class = ClassType::new("Object3D");
    class.properties = vec![
        prop("isObject3D", yes),
        prop("id", num),
        prop("uuid", str),
        prop("name", str),
        prop("type", str),
        prop("parent", parent),
        prop("children", children),
        prop("position", vector3_inst),
        prop("scale", vector3_inst),
        prop("visible", bool),
        prop("onBeforeRender", on_before_render),
    ];
    class.methods = vec![method("add", add), method("clone", clone)];
    class.constructor = Some(vec![]);
    class.extends = Some(event_dispatcher);
    ctx.replace_type(object3d, Type::Class(class));

    // Camera extends Object3D
    let matrix4 = ctx.reference_type("Matrix4");
    let mut class = ClassType::new("Camera");
    class.properties = vec![prop("isCamera", yes), prop("matrixWorldInverse", matrix4)];
    class.constructor = Some(vec![]);
    class.extends = Some(object3d);
    let camera = ctx.class_type(class);

    // PerspectiveCamera(fov, aspect, near, far) extends Camera
    let update = ctx.function_type(vec![], void);
    let mut class = ClassType::new("PerspectiveCamera");
    class.properties = vec![
        prop("isPerspectiveCamera", yes),
        prop("fov", num),
        prop("aspect", num),
        prop("near", num),
        prop("far", num),
        prop("zoom", num),
    ];
    class.methods = vec![method("updateProjectionMatrix", update)];
    class.constructor = Some(vec![num, num, num, num]);
    class.extends = Some(camera);
    let perspective_camera = ctx.class_type(class);

    Scene {
        ctx,
        vector3,
        color,
        added_event,
        removed_event,
        event_dispatcher,
        object3d,
        camera,
        perspective_camera,
    }
}
