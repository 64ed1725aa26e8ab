//! The base `TestSuite` class: no-op lifecycle hooks plus the assertion
//! helpers every suite inherits.

use crate::runtime::class::ClassHandle;
use crate::runtime::declarable::{Declarable, Module};
use crate::runtime::error::{DeclareError, RuntimeError};
use crate::runtime::ops;
use crate::runtime::registry::Registry;
use crate::runtime::value::Value;

/// Module id under which the base suite class is declared.
pub const SUITE_MODULE_ID: &str = "scooj.test/TestSuite";

/// Runtime name of the base suite class.
pub const SUITE_CLASS_NAME: &str = "TestSuite";

/// Declare the base `TestSuite` class in `registry` and return its handle.
/// Idempotent: a second call returns the already-declared class.
///
/// Suites inherit `setUp`/`tearDown` no-ops and the capability methods
/// `assertEqual` (loose equality), `assertStrictEqual` (identity/strict),
/// `assertTrue`, `assertFalse` and `fail`; `fail` raises a value flagged
/// as an assertion failure so the runner classifies it under `fails`.
pub fn define_base_suite(registry: &Registry) -> Result<ClassHandle, DeclareError> {
    if let Some(existing) = registry.lookup(SUITE_MODULE_ID, SUITE_CLASS_NAME) {
        return Ok(existing);
    }

    let module = Module::new(SUITE_MODULE_ID);
    let class = registry.declare_class(&module, None, Declarable::noop(SUITE_CLASS_NAME)?)?;

    registry.define_static_method(&module, Declarable::noop("suiteSetUp")?)?;
    registry.define_static_method(&module, Declarable::noop("suiteTearDown")?)?;
    registry.define_method(&module, Declarable::noop("setUp")?)?;
    registry.define_method(&module, Declarable::noop("tearDown")?)?;

    registry.define_method(
        &module,
        Declarable::new("assertEqual", |cx| {
            let expected = cx.arg(0);
            let actual = cx.arg(1);
            if ops::loose_eq(&expected, &actual) {
                return Ok(Value::Undefined);
            }
            Err(RuntimeError::assertion(assertion_message(
                cx.args().get(2),
                format!("{} != {}", expected, actual),
            )))
        })?,
    )?;

    registry.define_method(
        &module,
        Declarable::new("assertStrictEqual", |cx| {
            let expected = cx.arg(0);
            let actual = cx.arg(1);
            if ops::strict_eq(&expected, &actual) {
                return Ok(Value::Undefined);
            }
            Err(RuntimeError::assertion(assertion_message(
                cx.args().get(2),
                format!("{} !== {}", expected, actual),
            )))
        })?,
    )?;

    registry.define_method(
        &module,
        Declarable::new("assertTrue", |cx| {
            let actual = cx.arg(0);
            if actual.truthy() {
                return Ok(Value::Undefined);
            }
            Err(RuntimeError::assertion(assertion_message(
                cx.args().get(1),
                format!("{} is not truthy", actual),
            )))
        })?,
    )?;

    registry.define_method(
        &module,
        Declarable::new("assertFalse", |cx| {
            let actual = cx.arg(0);
            if !actual.truthy() {
                return Ok(Value::Undefined);
            }
            Err(RuntimeError::assertion(assertion_message(
                cx.args().get(1),
                format!("{} is not falsey", actual),
            )))
        })?,
    )?;

    registry.define_method(
        &module,
        Declarable::new("fail", |cx| {
            Err(RuntimeError::assertion(assertion_message(
                cx.args().first(),
                "failure".to_string(),
            )))
        })?,
    )?;

    registry.end_class(&module);
    Ok(class)
}

fn assertion_message(explicit: Option<&Value>, fallback: String) -> String {
    match explicit {
        Some(Value::Undefined) | None => fallback,
        Some(value) => value.to_string(),
    }
}
