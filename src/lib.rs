//! # scooj - classes over a dynamic object runtime
//!
//! A small class-definition facility layering named classes, single
//! inheritance, super dispatch, static and instance methods, virtual
//! properties (getters/setters) and mixins on top of a prototype-style
//! dynamic object runtime, plus the minimal test harness that exercises
//! it end to end.
//!
//! ## Quick Start
//!
//! ### Declaring a class
//!
//! ```
//! use scooj::runtime::{Declarable, Module, Registry, Value};
//!
//! let registry = Registry::new();
//! let module = Module::new("sample/point");
//!
//! let point = registry
//!     .declare_class(
//!         &module,
//!         None,
//!         Declarable::new("Point", |cx| {
//!             cx.registry().set_property(cx.this(), "x", cx.arg(0))?;
//!             cx.registry().set_property(cx.this(), "y", cx.arg(1))?;
//!             Ok(Value::Undefined)
//!         })
//!         .unwrap(),
//!     )
//!     .unwrap();
//!
//! registry
//!     .define_method(
//!         &module,
//!         Declarable::new("magnitude2", |cx| {
//!             let registry = cx.registry();
//!             let x = match registry.get_property(cx.this(), "x")? {
//!                 Value::Number(n) => n,
//!                 _ => 0.0,
//!             };
//!             let y = match registry.get_property(cx.this(), "y")? {
//!                 Value::Number(n) => n,
//!                 _ => 0.0,
//!             };
//!             Ok(Value::Number(x * x + y * y))
//!         })
//!         .unwrap(),
//!     )
//!     .unwrap();
//! registry.end_class(&module);
//!
//! let p = point
//!     .construct(&[Value::Number(3.0), Value::Number(4.0)])
//!     .unwrap();
//! let m = registry.call_method(&p, "magnitude2", &[]).unwrap();
//! assert_eq!(m, Value::Number(25.0));
//! ```
//!
//! ### Running suites
//!
//! Declare suite classes inheriting from the base class declared by
//! [`harness::define_base_suite`], register them with a
//! [`harness::TestRunner`], and render the
//! result record with the pure formatters in [`harness::report`].
//!
//! ## Architecture
//!
//! - **[`runtime`]** - the class system: registry arena of class records,
//!   method attachment into six tables, mixin application by copy, and
//!   per-class super dispatchers resolving against live tables
//! - **[`harness`]** - suite discovery, per-test setup/teardown, and
//!   pass/fail/error classification over the runtime

#[macro_use]
extern crate lazy_static;

pub mod harness;
pub mod runtime;

pub use crate::harness::{TestResults, TestRunner};
pub use crate::runtime::{
    ClassHandle, ClassKey, Declarable, DeclareError, Mixin, Module, Registry, RuntimeError,
    SuperDispatcher, Value,
};
