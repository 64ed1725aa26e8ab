//! Tests for class declaration, method attachment and the registry's
//! bookkeeping: open-class cursors, module exports and the ambient
//! declaration API.

extern crate scooj;

use scooj::runtime::globals;
use scooj::runtime::{ClassHandle, DeclareError, Declarable, Module, Registry, Value};

/// Helper to declare a class whose constructor does nothing.
fn declare_empty(registry: &Registry, module: &Module, name: &str) -> ClassHandle {
    registry
        .declare_class(module, None, Declarable::noop(name).unwrap())
        .unwrap()
}

/// Helper to build a method that returns a fixed number.
fn returns(name: &str, n: f64) -> Declarable {
    Declarable::new(name, move |_cx| Ok(Value::Number(n))).unwrap()
}

#[test]
fn test_declare_and_lookup() {
    let registry = Registry::new();
    let module = Module::new("geometry/Square");
    let class = declare_empty(&registry, &module, "Square");

    assert_eq!(class.name(), "Square");
    assert_eq!(class.key().module_id(), "geometry/Square");
    assert!(registry.is_declared(class.key()));
    assert!(registry.lookup("geometry/Square", "Square").is_some());
    assert!(registry.lookup("geometry/Square", "Circle").is_none());
}

#[test]
fn test_duplicate_class_is_rejected() {
    let registry = Registry::new();
    let module = Module::new("geometry/Square");
    declare_empty(&registry, &module, "Square");

    let err = registry
        .declare_class(&module, None, Declarable::noop("Square").unwrap())
        .unwrap_err();
    match err {
        DeclareError::DuplicateClass(name) => {
            assert_eq!(name, "geometry/Square::Square");
        }
        other => panic!("expected DuplicateClass, got {:?}", other),
    }

    // The failed declaration left the cursor alone: methods still attach
    // to the original class.
    registry.define_method(&module, returns("side", 4.0)).unwrap();
    let square = registry.lookup("geometry/Square", "Square").unwrap();
    assert!(square.find_method("side").is_some());
}

#[test]
fn test_same_class_name_in_two_modules() {
    let registry = Registry::new();
    let module_a = Module::new("app/a");
    let module_b = Module::new("app/b");
    let a = declare_empty(&registry, &module_a, "Widget");
    let b = declare_empty(&registry, &module_b, "Widget");
    assert_ne!(a.key(), b.key());

    // Cursors are per-module, so attachment can interleave.
    registry.define_method(&module_a, returns("id", 1.0)).unwrap();
    registry.define_method(&module_b, returns("id", 2.0)).unwrap();

    let obj_a = a.construct(&[]).unwrap();
    let obj_b = b.construct(&[]).unwrap();
    assert_eq!(
        registry.call_method(&obj_a, "id", &[]).unwrap(),
        Value::Number(1.0)
    );
    assert_eq!(
        registry.call_method(&obj_b, "id", &[]).unwrap(),
        Value::Number(2.0)
    );
}

#[test]
fn test_empty_module_id_is_invalid() {
    let registry = Registry::new();
    let module = Module::new("");
    let err = registry
        .declare_class(&module, None, Declarable::noop("Square").unwrap())
        .unwrap_err();
    assert!(matches!(err, DeclareError::InvalidDeclaration(_)));
}

#[test]
fn test_anonymous_declarable_is_invalid() {
    let err = Declarable::new("", |_cx| Ok(Value::Undefined)).unwrap_err();
    assert!(matches!(err, DeclareError::InvalidDeclaration(_)));
}

#[test]
fn test_method_without_open_class() {
    let registry = Registry::new();
    let module = Module::new("app/empty");
    let err = registry
        .define_method(&module, returns("orphan", 0.0))
        .unwrap_err();
    assert!(matches!(err, DeclareError::NoOpenClass(_)));
}

#[test]
fn test_end_class_closes_the_cursor() {
    let registry = Registry::new();
    let module = Module::new("app/closed");
    declare_empty(&registry, &module, "Closed");
    registry.end_class(&module);

    let err = registry
        .define_method(&module, returns("late", 0.0))
        .unwrap_err();
    assert!(matches!(err, DeclareError::NoOpenClass(_)));
    assert!(matches!(
        registry.super_dispatcher(&module),
        Err(DeclareError::NoOpenClass(_))
    ));
}

#[test]
fn test_duplicate_method_in_same_table() {
    let registry = Registry::new();
    let module = Module::new("app/dup");
    declare_empty(&registry, &module, "Dup");
    registry.define_method(&module, returns("value", 1.0)).unwrap();

    let err = registry
        .define_method(&module, returns("value", 2.0))
        .unwrap_err();
    match err {
        DeclareError::DuplicateMethod(class, method) => {
            assert_eq!(class, "Dup");
            assert_eq!(method, "value");
        }
        other => panic!("expected DuplicateMethod, got {:?}", other),
    }
}

#[test]
fn test_same_name_in_different_tables() {
    let registry = Registry::new();
    let module = Module::new("app/tables");
    let class = declare_empty(&registry, &module, "Tables");

    // One name may live in every container at once.
    registry.define_method(&module, returns("size", 1.0)).unwrap();
    registry
        .define_static_method(&module, returns("size", 2.0))
        .unwrap();
    registry.define_getter(&module, returns("size", 3.0)).unwrap();
    registry
        .define_setter(
            &module,
            Declarable::new("size", |_cx| Ok(Value::Undefined)).unwrap(),
        )
        .unwrap();
    registry
        .define_static_getter(&module, returns("size", 4.0))
        .unwrap();
    registry
        .define_static_setter(
            &module,
            Declarable::new("size", |_cx| Ok(Value::Undefined)).unwrap(),
        )
        .unwrap();

    let obj = class.construct(&[]).unwrap();
    assert_eq!(
        registry.call_method(&obj, "size", &[]).unwrap(),
        Value::Number(1.0)
    );
    assert_eq!(class.call_static("size", &[]).unwrap(), Value::Number(2.0));
}

#[test]
fn test_getters_and_setters_are_virtual_properties() {
    let registry = Registry::new();
    let module = Module::new("shapes/Rect");
    let class = declare_empty(&registry, &module, "Rect");
    registry
        .define_setter(
            &module,
            Declarable::new("width", |cx| {
                // Store a doubled copy so reads can prove the setter ran.
                let incoming = match cx.arg(0) {
                    Value::Number(n) => n,
                    _ => 0.0,
                };
                cx.registry()
                    .set_property(cx.this(), "width_raw", Value::Number(incoming))?;
                Ok(Value::Undefined)
            })
            .unwrap(),
        )
        .unwrap();
    registry
        .define_getter(
            &module,
            Declarable::new("area", |cx| {
                let w = match cx.registry().get_property(cx.this(), "width_raw")? {
                    Value::Number(n) => n,
                    _ => 0.0,
                };
                Ok(Value::Number(w * w))
            })
            .unwrap(),
        )
        .unwrap();

    let rect = class.construct(&[]).unwrap();
    registry
        .set_property(&rect, "width", Value::Number(6.0))
        .unwrap();
    assert_eq!(
        registry.get_property(&rect, "width_raw").unwrap(),
        Value::Number(6.0)
    );
    assert_eq!(
        registry.get_property(&rect, "area").unwrap(),
        Value::Number(36.0)
    );
    // A name with neither getter nor field reads as undefined.
    assert_eq!(
        registry.get_property(&rect, "height").unwrap(),
        Value::Undefined
    );
}

#[test]
fn test_static_accessors() {
    let registry = Registry::new();
    let module = Module::new("app/counter");
    let class = declare_empty(&registry, &module, "Counter");
    registry
        .define_static_getter(&module, returns("limit", 10.0))
        .unwrap();

    assert_eq!(class.get_static("limit").unwrap(), Value::Number(10.0));
    // Reading an absent static accessor yields undefined rather than
    // an error; writing one is an error.
    assert_eq!(class.get_static("missing").unwrap(), Value::Undefined);
    assert!(class.set_static("missing", Value::Number(1.0)).is_err());
    assert!(class.call_static("missing", &[]).is_err());
}

#[test]
fn test_method_metadata() {
    let registry = Registry::new();
    let module = Module::new("app/meta");
    let class = declare_empty(&registry, &module, "Meta");
    registry.define_method(&module, returns("plain", 0.0)).unwrap();
    let meta = registry
        .define_static_method(&module, returns("origin", 0.0))
        .unwrap();

    assert_eq!(meta.signature, "static Meta.origin()");
    assert!(meta.flags.is_static);
    let plain = class.find_method("plain").unwrap();
    assert_eq!(plain.signature, "Meta.plain()");
    assert!(!plain.flags.is_static);
    assert!(class.find_method("absent").is_none());
}

#[test]
fn test_module_export_is_the_first_class() {
    let registry = Registry::new();
    let module = Module::new("app/multi");
    declare_empty(&registry, &module, "First");
    declare_empty(&registry, &module, "Second");

    let export = registry.module_export("app/multi").unwrap();
    assert_eq!(export.name(), "First");
    // The second class is still reachable by full name.
    assert!(registry.lookup("app/multi", "Second").is_some());
}

#[test]
fn test_install_globals_is_idempotent() {
    let first = Registry::new();
    let second = Registry::new();
    globals::install_globals(&first);
    globals::install_globals(&second);
    assert!(globals::globals_installed());

    // The second install was a no-op, so declarations land in `first`.
    let module = Module::new("app/ambient");
    globals::def_class(&module, None, Declarable::noop("Ambient").unwrap()).unwrap();
    assert!(first.lookup("app/ambient", "Ambient").is_some());
    assert!(second.lookup("app/ambient", "Ambient").is_none());

    globals::uninstall_globals();
    assert!(!globals::globals_installed());
}

#[test]
fn test_ambient_declaration_round_trip() {
    let registry = Registry::new();
    globals::install_globals(&registry);

    let module = Module::new("app/global_point");
    globals::def_class(&module, None, Declarable::noop("GPoint").unwrap()).unwrap();
    globals::def_method(&module, returns("zero", 0.0)).unwrap();
    globals::def_static_method(&module, returns("count", 7.0)).unwrap();
    globals::def_getter(&module, returns("norm", 0.0)).unwrap();

    let class = registry.lookup("app/global_point", "GPoint").unwrap();
    assert_eq!(class.call_static("count", &[]).unwrap(), Value::Number(7.0));
    assert!(class.find_method("zero").is_some());

    globals::uninstall_globals();
}

#[test]
fn test_ambient_calls_require_installation() {
    let module = Module::new("app/uninstalled");
    let err = globals::def_class(&module, None, Declarable::noop("Nope").unwrap()).unwrap_err();
    assert!(matches!(err, DeclareError::InvalidDeclaration(_)));
}

#[test]
fn test_ambient_names_cover_the_declaration_api() {
    let names = globals::ambient_names();
    assert!(names.contains(&"def_class"));
    assert!(names.contains(&"def_super"));
    assert!(names.contains(&"use_mixin"));
    assert_eq!(names.len(), 9);
}
