//! Invocation context handed to every native body.

use std::rc::Rc;

use crate::runtime::class::ClassKey;
use crate::runtime::error::RuntimeError;
use crate::runtime::registry::Registry;
use crate::runtime::supers::SuperDispatcher;
use crate::runtime::value::Value;

/// The shape of every native body: constructor, method or accessor.
pub type NativeFn = Rc<dyn Fn(&CallContext) -> Result<Value, RuntimeError>>;

/// Everything a native body can see while it runs: the registry it lives
/// in, the class the body was attached to, the receiver, and the call
/// arguments. Static bodies receive `Value::Undefined` as the receiver.
pub struct CallContext<'a> {
    registry: Registry,
    owner: ClassKey,
    this: &'a Value,
    args: &'a [Value],
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        registry: Registry,
        owner: ClassKey,
        this: &'a Value,
        args: &'a [Value],
    ) -> CallContext<'a> {
        CallContext {
            registry,
            owner,
            this,
            args,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The class this body was attached to (not necessarily the receiver's
    /// class — the receiver may be an instance of a subclass).
    pub fn owner(&self) -> &ClassKey {
        &self.owner
    }

    pub fn this(&self) -> &Value {
        self.this
    }

    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// The i-th argument, or `Undefined` when absent.
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).cloned().unwrap_or(Value::Undefined)
    }

    /// The super dispatcher bound to the owning class.
    pub fn superd(&self) -> SuperDispatcher {
        SuperDispatcher::new(self.registry.clone(), self.owner.clone())
    }

    /// Invoke the superclass constructor (`method` = `None`) or a
    /// superclass method on the current receiver.
    pub fn call_super(
        &self,
        method: Option<&str>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        self.superd().call(self.this, method, args)
    }
}
