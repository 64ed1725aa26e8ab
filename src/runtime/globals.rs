//! Ambient installation of the declaration primitives.
//!
//! Declarative class bodies call `def_class`/`def_method`/... without
//! threading a [`Registry`] through every call. `install_globals` binds
//! the ambient registry once; the binding is thread-local because the
//! registry itself is single-threaded by design.

use std::cell::RefCell;

use crate::runtime::class::{ClassHandle, MethodMetadata};
use crate::runtime::declarable::{Declarable, Module};
use crate::runtime::error::DeclareError;
use crate::runtime::mixin::Mixin;
use crate::runtime::registry::Registry;
use crate::runtime::supers::SuperDispatcher;

thread_local! {
    static AMBIENT: RefCell<Option<Registry>> = RefCell::new(None);
}

lazy_static! {
    static ref AMBIENT_NAMES: Vec<&'static str> = vec![
        "def_class",
        "def_method",
        "def_static_method",
        "def_getter",
        "def_setter",
        "def_static_getter",
        "def_static_setter",
        "def_super",
        "use_mixin",
    ];
}

/// Bind `registry` as the ambient registry for this thread. Idempotent:
/// once installed, later calls are no-ops, never errors.
pub fn install_globals(registry: &Registry) {
    AMBIENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(registry.clone());
        }
    });
}

pub fn globals_installed() -> bool {
    AMBIENT.with(|slot| slot.borrow().is_some())
}

/// The names the installation exposes, for introspection.
pub fn ambient_names() -> &'static [&'static str] {
    &AMBIENT_NAMES
}

/// Drop the ambient binding. Intended for test isolation; regular code
/// installs once and leaves the binding for the process lifetime.
pub fn uninstall_globals() {
    AMBIENT.with(|slot| {
        slot.borrow_mut().take();
    });
}

fn ambient() -> Result<Registry, DeclareError> {
    AMBIENT.with(|slot| {
        slot.borrow().clone().ok_or_else(|| {
            DeclareError::InvalidDeclaration(
                "globals are not installed; call install_globals first".to_string(),
            )
        })
    })
}

pub fn def_class(
    module: &Module,
    superclass: Option<&ClassHandle>,
    constructor: Declarable,
) -> Result<ClassHandle, DeclareError> {
    ambient()?.declare_class(module, superclass, constructor)
}

pub fn def_method(module: &Module, decl: Declarable) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_method(module, decl)
}

pub fn def_static_method(
    module: &Module,
    decl: Declarable,
) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_static_method(module, decl)
}

pub fn def_getter(module: &Module, decl: Declarable) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_getter(module, decl)
}

pub fn def_setter(module: &Module, decl: Declarable) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_setter(module, decl)
}

pub fn def_static_getter(
    module: &Module,
    decl: Declarable,
) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_static_getter(module, decl)
}

pub fn def_static_setter(
    module: &Module,
    decl: Declarable,
) -> Result<MethodMetadata, DeclareError> {
    ambient()?.define_static_setter(module, decl)
}

pub fn def_super(module: &Module) -> Result<SuperDispatcher, DeclareError> {
    ambient()?.super_dispatcher(module)
}

pub fn use_mixin(module: &Module, mixin: &Mixin) -> Result<(), DeclareError> {
    ambient()?.apply_mixin(module, mixin)
}
