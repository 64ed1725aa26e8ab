//! Super dispatch: the per-class invoker chaining to the superclass.

use std::fmt;

use crate::runtime::class::ClassKey;
use crate::runtime::error::RuntimeError;
use crate::runtime::registry::Registry;
use crate::runtime::value::Value;

/// Invoker bound to one declaring class. With no method name it applies
/// the superclass constructor to the receiver; with a name it resolves
/// that name on the superclass's live method surface *at call time*, so a
/// method installed on the parent after subclassing is what super finds.
///
/// Only one level is reachable per call: reaching a grandparent's
/// implementation goes through the parent's own dispatcher.
#[derive(Clone)]
pub struct SuperDispatcher {
    registry: Registry,
    class: ClassKey,
}

impl SuperDispatcher {
    pub(crate) fn new(registry: Registry, class: ClassKey) -> SuperDispatcher {
        SuperDispatcher { registry, class }
    }

    /// The class this dispatcher was declared for.
    pub fn class(&self) -> &ClassKey {
        &self.class
    }

    pub fn call(
        &self,
        receiver: &Value,
        method: Option<&str>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let superclass = self.registry.superclass_of(&self.class).ok_or_else(|| {
            RuntimeError::new(format!("class has no superclass: {}", self.class))
        })?;
        match method {
            None => {
                let constructor = self.registry.constructor_of(&superclass).ok_or_else(|| {
                    RuntimeError::new(format!("class is not registered: {}", superclass))
                })?;
                self.registry
                    .invoke(&superclass, &constructor, receiver, args)
            }
            Some(name) => {
                let (owner, body) = self
                    .registry
                    .resolve_instance_method(&superclass, name)
                    .ok_or_else(|| {
                        RuntimeError::new(format!(
                            "super: '{}' is not callable on {}",
                            name, superclass
                        ))
                    })?;
                self.registry.invoke(&owner, &body, receiver, args)
            }
        }
    }
}

impl fmt::Debug for SuperDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuperDispatcher({})", self.class)
    }
}
