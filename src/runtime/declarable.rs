use std::fmt;
use std::rc::Rc;

use crate::runtime::error::{DeclareError, RuntimeError};
use crate::runtime::invoke::{CallContext, NativeFn};
use crate::runtime::value::Value;

/// Identity of the module declaring a class. The id must be stable and
/// process-unique; it keys both the class registry and the current-class
/// cursor, so two modules never collide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    id: String,
}

impl Module {
    pub fn new(id: impl Into<String>) -> Module {
        Module { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A named callable unit: the only thing the registry accepts as a
/// constructor or method body. Anonymity is rejected at construction
/// instead of being discovered by introspection later.
#[derive(Clone)]
pub struct Declarable {
    name: String,
    body: NativeFn,
}

impl Declarable {
    pub fn new<F>(name: impl Into<String>, body: F) -> Result<Declarable, DeclareError>
    where
        F: Fn(&CallContext) -> Result<Value, RuntimeError> + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(DeclareError::InvalidDeclaration(
                "function must not be anonymous".to_string(),
            ));
        }
        Ok(Declarable {
            name,
            body: Rc::new(body),
        })
    }

    /// A named body that does nothing and returns `Undefined`.
    pub fn noop(name: impl Into<String>) -> Result<Declarable, DeclareError> {
        Declarable::new(name, |_| Ok(Value::Undefined))
    }

    pub(crate) fn from_parts(name: String, body: NativeFn) -> Declarable {
        Declarable { name, body }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn body(&self) -> NativeFn {
        Rc::clone(&self.body)
    }
}

impl fmt::Debug for Declarable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Declarable({})", self.name)
    }
}
