use std::fmt;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::runtime::error::RuntimeError;
use crate::runtime::invoke::NativeFn;
use crate::runtime::registry::Registry;
use crate::runtime::supers::SuperDispatcher;
use crate::runtime::value::Value;

/// Unique identity of a class: owning module id plus declared name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassKey {
    module_id: String,
    name: String,
}

impl ClassKey {
    pub fn new(module_id: impl Into<String>, name: impl Into<String>) -> ClassKey {
        ClassKey {
            module_id: module_id.into(),
            name: name.into(),
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ClassKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module_id, self.name)
    }
}

/// Which of the six method tables a member lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodFlags {
    pub is_static: bool,
    pub is_getter: bool,
    pub is_setter: bool,
}

/// Per-method record kept alongside the live body.
#[derive(Clone, Debug)]
pub struct MethodMetadata {
    pub owner: ClassKey,
    pub name: String,
    pub flags: MethodFlags,
    /// Human-readable signature, e.g. `static Point.origin()` or
    /// `get Point3.z`.
    pub signature: String,
}

impl MethodMetadata {
    pub(crate) fn new(owner: ClassKey, name: &str, flags: MethodFlags) -> MethodMetadata {
        let prefix = if flags.is_static { "static " } else { "" };
        let signature = if flags.is_getter {
            format!("{}get {}.{}", prefix, owner.name(), name)
        } else if flags.is_setter {
            format!("{}set {}.{}", prefix, owner.name(), name)
        } else {
            format!("{}{}.{}()", prefix, owner.name(), name)
        };
        MethodMetadata {
            owner,
            name: name.to_string(),
            flags,
            signature,
        }
    }
}

pub(crate) struct MethodEntry {
    pub(crate) meta: MethodMetadata,
    pub(crate) body: NativeFn,
}

pub(crate) type MethodTable = IndexMap<String, MethodEntry>;

/// Registry-owned record of one declared class. The registry arena is the
/// canonical owner; the superclass link is a non-owning key into it.
pub(crate) struct ClassMetadata {
    pub(crate) superclass: Option<ClassKey>,
    pub(crate) constructor: NativeFn,
    /// Mixin source names, in application order, duplicates allowed.
    pub(crate) mixins: Vec<String>,
    pub(crate) methods: MethodTable,
    pub(crate) static_methods: MethodTable,
    pub(crate) getters: MethodTable,
    pub(crate) setters: MethodTable,
    pub(crate) static_getters: MethodTable,
    pub(crate) static_setters: MethodTable,
}

impl ClassMetadata {
    pub(crate) fn new(superclass: Option<ClassKey>, constructor: NativeFn) -> ClassMetadata {
        ClassMetadata {
            superclass,
            constructor,
            mixins: Vec::new(),
            methods: IndexMap::new(),
            static_methods: IndexMap::new(),
            getters: IndexMap::new(),
            setters: IndexMap::new(),
            static_getters: IndexMap::new(),
            static_setters: IndexMap::new(),
        }
    }

    pub(crate) fn table_mut(&mut self, flags: MethodFlags) -> &mut MethodTable {
        match (flags.is_static, flags.is_getter, flags.is_setter) {
            (false, false, false) => &mut self.methods,
            (true, false, false) => &mut self.static_methods,
            (false, true, _) => &mut self.getters,
            (false, false, true) => &mut self.setters,
            (true, true, _) => &mut self.static_getters,
            (true, false, true) => &mut self.static_setters,
        }
    }
}

/// Live handle to a declared class. Cheap to clone; instantiation and
/// static access go through it.
#[derive(Clone)]
pub struct ClassHandle {
    key: ClassKey,
    registry: Registry,
}

impl ClassHandle {
    pub(crate) fn new(key: ClassKey, registry: Registry) -> ClassHandle {
        ClassHandle { key, registry }
    }

    pub fn key(&self) -> &ClassKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a fresh instance and run the constructor chain over it.
    pub fn construct(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        self.registry.construct(&self.key, args)
    }

    pub fn superclass(&self) -> Option<ClassHandle> {
        self.registry
            .superclass_of(&self.key)
            .map(|key| ClassHandle::new(key, self.registry.clone()))
    }

    pub fn super_dispatcher(&self) -> SuperDispatcher {
        SuperDispatcher::new(self.registry.clone(), self.key.clone())
    }

    pub fn has_static_method(&self, name: &str) -> bool {
        self.registry.has_static_method(&self.key, name)
    }

    /// Invoke an own static method. Statics do not inherit.
    pub fn call_static(&self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        self.registry.call_static(&self.key, name, args)
    }

    /// Read a static virtual property (static getter).
    pub fn get_static(&self, name: &str) -> Result<Value, RuntimeError> {
        self.registry.get_static(&self.key, name)
    }

    /// Write a static virtual property (static setter).
    pub fn set_static(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        self.registry.set_static(&self.key, name, value)
    }

    /// Own instance-method names, declaration order.
    pub fn own_instance_method_names(&self) -> Vec<String> {
        self.registry.own_instance_method_names(&self.key)
    }

    /// The full instance-method surface: own names first, then inherited,
    /// shadowed names listed once.
    pub fn instance_method_names(&self) -> Vec<String> {
        self.registry.instance_method_names(&self.key)
    }

    /// Metadata for an own member, searched across all six tables.
    pub fn find_method(&self, name: &str) -> Option<MethodMetadata> {
        self.registry.find_method(&self.key, name)
    }

    /// Mixin sources applied to this class, in application order.
    pub fn mixins(&self) -> Vec<String> {
        self.registry.mixins_of(&self.key)
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassHandle({})", self.key)
    }
}
