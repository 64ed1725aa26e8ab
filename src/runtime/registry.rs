//! The class registry: declaration, method attachment, and every runtime
//! resolution (construction, method calls, virtual properties).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runtime::class::{
    ClassHandle, ClassKey, ClassMetadata, MethodEntry, MethodFlags, MethodMetadata,
};
use crate::runtime::declarable::{Declarable, Module};
use crate::runtime::error::{DeclareError, RuntimeError};
use crate::runtime::invoke::{CallContext, NativeFn};
use crate::runtime::mixin::Mixin;
use crate::runtime::supers::SuperDispatcher;
use crate::runtime::value::Value;

/// Process-wide source of truth for declared classes, plus the per-module
/// current-class cursor. Cheap to clone: clones share the same arena.
///
/// All mutation happens at declaration time from a single thread; the
/// handle is deliberately not `Send`.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RefCell<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    /// Arena of class records, keyed by full class name, insertion order.
    classes: IndexMap<ClassKey, ClassMetadata>,
    /// Module id -> the class currently open for method attachment.
    open_classes: HashMap<String, ClassKey>,
    /// Module id -> the first class the module declared.
    module_exports: HashMap<String, ClassKey>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            inner: Rc::new(RefCell::new(RegistryInner::default())),
        }
    }

    // ------------------------------------------------------------------
    // declaration
    // ------------------------------------------------------------------

    /// Declare a class: register its metadata, open it for method
    /// attachment, and record it as the module's primary export if it is
    /// the module's first class. Nothing is mutated on failure.
    pub fn declare_class(
        &self,
        module: &Module,
        superclass: Option<&ClassHandle>,
        constructor: Declarable,
    ) -> Result<ClassHandle, DeclareError> {
        if module.id().is_empty() {
            return Err(DeclareError::InvalidDeclaration(
                "module has no id".to_string(),
            ));
        }
        let key = ClassKey::new(module.id(), constructor.name());
        let superclass_key = superclass.map(|s| s.key().clone());
        {
            let inner = self.inner.borrow();
            if inner.classes.contains_key(&key) {
                return Err(DeclareError::DuplicateClass(key.to_string()));
            }
            if let Some(superclass_key) = &superclass_key {
                if !inner.classes.contains_key(superclass_key) {
                    return Err(DeclareError::InvalidDeclaration(format!(
                        "superclass is not registered here: {}",
                        superclass_key
                    )));
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.classes.insert(
            key.clone(),
            ClassMetadata::new(superclass_key, constructor.body()),
        );
        inner
            .open_classes
            .insert(module.id().to_string(), key.clone());
        inner
            .module_exports
            .entry(module.id().to_string())
            .or_insert_with(|| key.clone());
        drop(inner);

        Ok(ClassHandle::new(key, self.clone()))
    }

    pub fn define_method(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: false, is_getter: false, is_setter: false })
    }

    pub fn define_static_method(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: true, is_getter: false, is_setter: false })
    }

    pub fn define_getter(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: false, is_getter: true, is_setter: false })
    }

    pub fn define_setter(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: false, is_getter: false, is_setter: true })
    }

    pub fn define_static_getter(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: true, is_getter: true, is_setter: false })
    }

    pub fn define_static_setter(
        &self,
        module: &Module,
        decl: Declarable,
    ) -> Result<MethodMetadata, DeclareError> {
        self.add_method(module, decl, MethodFlags { is_static: true, is_getter: false, is_setter: true })
    }

    fn add_method(
        &self,
        module: &Module,
        decl: Declarable,
        flags: MethodFlags,
    ) -> Result<MethodMetadata, DeclareError> {
        let mut inner = self.inner.borrow_mut();
        let key = inner
            .open_classes
            .get(module.id())
            .cloned()
            .ok_or_else(|| DeclareError::NoOpenClass(module.id().to_string()))?;
        let class = inner
            .classes
            .get_mut(&key)
            .expect("open class is always registered");
        let table = class.table_mut(flags);
        if table.contains_key(decl.name()) {
            return Err(DeclareError::DuplicateMethod(
                key.name().to_string(),
                decl.name().to_string(),
            ));
        }
        let meta = MethodMetadata::new(key, decl.name(), flags);
        table.insert(
            decl.name().to_string(),
            MethodEntry {
                meta: meta.clone(),
                body: decl.body(),
            },
        );
        Ok(meta)
    }

    /// Copy a mixin's entries into the open class as instance methods.
    /// Every entry is validated before any is committed, so a failing
    /// application leaves the class untouched.
    pub fn apply_mixin(&self, module: &Module, mixin: &Mixin) -> Result<(), DeclareError> {
        let mut inner = self.inner.borrow_mut();
        let key = inner
            .open_classes
            .get(module.id())
            .cloned()
            .ok_or_else(|| DeclareError::NoOpenClass(module.id().to_string()))?;
        let class = inner
            .classes
            .get_mut(&key)
            .expect("open class is always registered");

        let mut seen: Vec<&str> = Vec::new();
        for (storage_key, decl) in mixin.entries() {
            if storage_key != decl.name() {
                return Err(DeclareError::NameMismatch(
                    storage_key.to_string(),
                    decl.name().to_string(),
                ));
            }
            if class.methods.contains_key(storage_key) || seen.contains(&storage_key) {
                return Err(DeclareError::DuplicateMethod(
                    key.name().to_string(),
                    storage_key.to_string(),
                ));
            }
            seen.push(storage_key);
        }

        let flags = MethodFlags { is_static: false, is_getter: false, is_setter: false };
        for (storage_key, decl) in mixin.entries() {
            let meta = MethodMetadata::new(key.clone(), storage_key, flags);
            class.methods.insert(
                storage_key.to_string(),
                MethodEntry {
                    meta,
                    body: decl.body(),
                },
            );
        }
        class.mixins.push(mixin.name().to_string());
        Ok(())
    }

    /// Close the module's open class; further attachments fail until the
    /// module declares another class.
    pub fn end_class(&self, module: &Module) {
        self.inner.borrow_mut().open_classes.remove(module.id());
    }

    /// The super dispatcher bound to the module's open class.
    pub fn super_dispatcher(&self, module: &Module) -> Result<SuperDispatcher, DeclareError> {
        let inner = self.inner.borrow();
        let key = inner
            .open_classes
            .get(module.id())
            .cloned()
            .ok_or_else(|| DeclareError::NoOpenClass(module.id().to_string()))?;
        Ok(SuperDispatcher::new(self.clone(), key))
    }

    // ------------------------------------------------------------------
    // introspection
    // ------------------------------------------------------------------

    /// The first class a module declared, if any.
    pub fn module_export(&self, module_id: &str) -> Option<ClassHandle> {
        let key = self.inner.borrow().module_exports.get(module_id).cloned()?;
        Some(ClassHandle::new(key, self.clone()))
    }

    pub fn lookup(&self, module_id: &str, name: &str) -> Option<ClassHandle> {
        let key = ClassKey::new(module_id, name);
        if self.inner.borrow().classes.contains_key(&key) {
            Some(ClassHandle::new(key, self.clone()))
        } else {
            None
        }
    }

    pub fn is_declared(&self, key: &ClassKey) -> bool {
        self.inner.borrow().classes.contains_key(key)
    }

    /// The runtime class of a value, when it is an instance.
    pub fn class_of(&self, value: &Value) -> Option<ClassHandle> {
        let object = value.as_object()?;
        let key = object.borrow().class.clone();
        if self.is_declared(&key) {
            Some(ClassHandle::new(key, self.clone()))
        } else {
            None
        }
    }

    pub(crate) fn superclass_of(&self, key: &ClassKey) -> Option<ClassKey> {
        self.inner.borrow().classes.get(key)?.superclass.clone()
    }

    pub(crate) fn mixins_of(&self, key: &ClassKey) -> Vec<String> {
        self.inner
            .borrow()
            .classes
            .get(key)
            .map(|c| c.mixins.clone())
            .unwrap_or_default()
    }

    pub(crate) fn own_instance_method_names(&self, key: &ClassKey) -> Vec<String> {
        self.inner
            .borrow()
            .classes
            .get(key)
            .map(|c| c.methods.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Own names first, then each ancestor's, shadowed names once.
    pub(crate) fn instance_method_names(&self, key: &ClassKey) -> Vec<String> {
        let inner = self.inner.borrow();
        let mut names: Vec<String> = Vec::new();
        let mut cursor = Some(key.clone());
        while let Some(current) = cursor {
            let class = match inner.classes.get(&current) {
                Some(class) => class,
                None => break,
            };
            for name in class.methods.keys() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
            cursor = class.superclass.clone();
        }
        names
    }

    /// Rebuild the declarable for an own instance method, used when a
    /// class's method table is snapshotted into a mixin.
    pub(crate) fn instance_method_declarable(
        &self,
        key: &ClassKey,
        name: &str,
    ) -> Option<(String, Declarable)> {
        let inner = self.inner.borrow();
        let entry = inner.classes.get(key)?.methods.get(name)?;
        Some((
            entry.meta.name.clone(),
            Declarable::from_parts(entry.meta.name.clone(), Rc::clone(&entry.body)),
        ))
    }

    pub(crate) fn find_method(&self, key: &ClassKey, name: &str) -> Option<MethodMetadata> {
        let inner = self.inner.borrow();
        let class = inner.classes.get(key)?;
        for table in &[
            &class.methods,
            &class.static_methods,
            &class.getters,
            &class.setters,
            &class.static_getters,
            &class.static_setters,
        ] {
            if let Some(entry) = table.get(name) {
                return Some(entry.meta.clone());
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // runtime resolution and invocation
    // ------------------------------------------------------------------

    pub(crate) fn invoke(
        &self,
        owner: &ClassKey,
        body: &NativeFn,
        this: &Value,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let cx = CallContext::new(self.clone(), owner.clone(), this, args);
        body(&cx)
    }

    pub(crate) fn construct(&self, key: &ClassKey, args: &[Value]) -> Result<Value, RuntimeError> {
        let constructor = self
            .constructor_of(key)
            .ok_or_else(|| RuntimeError::new(format!("class is not registered: {}", key)))?;
        let receiver = Value::object(key.clone());
        self.invoke(key, &constructor, &receiver, args)?;
        Ok(receiver)
    }

    pub(crate) fn constructor_of(&self, key: &ClassKey) -> Option<NativeFn> {
        self.inner
            .borrow()
            .classes
            .get(key)
            .map(|c| Rc::clone(&c.constructor))
    }

    /// Resolve an instance method by walking the superclass chain starting
    /// at `start`. Returns the defining class and the live body.
    pub(crate) fn resolve_instance_method(
        &self,
        start: &ClassKey,
        name: &str,
    ) -> Option<(ClassKey, NativeFn)> {
        self.resolve_in_chain(start, name, |class| &class.methods)
    }

    fn resolve_in_chain<F>(
        &self,
        start: &ClassKey,
        name: &str,
        table: F,
    ) -> Option<(ClassKey, NativeFn)>
    where
        F: Fn(&ClassMetadata) -> &crate::runtime::class::MethodTable,
    {
        let inner = self.inner.borrow();
        let mut cursor = Some(start.clone());
        while let Some(current) = cursor {
            let class = inner.classes.get(&current)?;
            if let Some(entry) = table(class).get(name) {
                return Some((entry.meta.owner.clone(), Rc::clone(&entry.body)));
            }
            cursor = class.superclass.clone();
        }
        None
    }

    pub fn has_instance_method(&self, value: &Value, name: &str) -> bool {
        match value.as_object() {
            Some(object) => {
                let key = object.borrow().class.clone();
                self.resolve_instance_method(&key, name).is_some()
            }
            None => false,
        }
    }

    /// Invoke an instance method on a receiver, resolving through the
    /// superclass chain.
    pub fn call_method(
        &self,
        receiver: &Value,
        name: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let object = receiver.as_object().ok_or_else(|| {
            RuntimeError::new(format!(
                "cannot call method '{}' on {}",
                name,
                receiver.type_name()
            ))
        })?;
        let key = object.borrow().class.clone();
        let (owner, body) = self.resolve_instance_method(&key, name).ok_or_else(|| {
            RuntimeError::new(format!("{} has no method named '{}'", key, name))
        })?;
        self.invoke(&owner, &body, receiver, args)
    }

    /// Read a property: accessor chain first, then instance fields,
    /// `Undefined` when absent.
    pub fn get_property(&self, receiver: &Value, name: &str) -> Result<Value, RuntimeError> {
        let object = receiver.as_object().ok_or_else(|| {
            RuntimeError::new(format!(
                "cannot read property '{}' of {}",
                name,
                receiver.type_name()
            ))
        })?;
        let key = object.borrow().class.clone();
        if let Some((owner, body)) = self.resolve_in_chain(&key, name, |class| &class.getters) {
            return self.invoke(&owner, &body, receiver, &[]);
        }
        Ok(object
            .borrow()
            .fields
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined))
    }

    /// Write a property: accessor chain first, then instance fields.
    pub fn set_property(
        &self,
        receiver: &Value,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let object = receiver.as_object().ok_or_else(|| {
            RuntimeError::new(format!(
                "cannot set property '{}' of {}",
                name,
                receiver.type_name()
            ))
        })?;
        let key = object.borrow().class.clone();
        if let Some((owner, body)) = self.resolve_in_chain(&key, name, |class| &class.setters) {
            self.invoke(&owner, &body, receiver, &[value])?;
            return Ok(());
        }
        object.borrow_mut().fields.insert(name.to_string(), value);
        Ok(())
    }

    // statics attach to the class itself and do not inherit

    pub(crate) fn has_static_method(&self, key: &ClassKey, name: &str) -> bool {
        self.inner
            .borrow()
            .classes
            .get(key)
            .map(|c| c.static_methods.contains_key(name))
            .unwrap_or(false)
    }

    pub(crate) fn call_static(
        &self,
        key: &ClassKey,
        name: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let body = {
            let inner = self.inner.borrow();
            let class = inner
                .classes
                .get(key)
                .ok_or_else(|| RuntimeError::new(format!("class is not registered: {}", key)))?;
            class
                .static_methods
                .get(name)
                .map(|entry| Rc::clone(&entry.body))
        };
        let body = body.ok_or_else(|| {
            RuntimeError::new(format!("{} has no static method named '{}'", key, name))
        })?;
        self.invoke(key, &body, &Value::Undefined, args)
    }

    pub(crate) fn get_static(&self, key: &ClassKey, name: &str) -> Result<Value, RuntimeError> {
        let body = {
            let inner = self.inner.borrow();
            inner
                .classes
                .get(key)
                .and_then(|c| c.static_getters.get(name))
                .map(|entry| Rc::clone(&entry.body))
        };
        match body {
            Some(body) => self.invoke(key, &body, &Value::Undefined, &[]),
            None => Ok(Value::Undefined),
        }
    }

    pub(crate) fn set_static(
        &self,
        key: &ClassKey,
        name: &str,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let body = {
            let inner = self.inner.borrow();
            inner
                .classes
                .get(key)
                .and_then(|c| c.static_setters.get(name))
                .map(|entry| Rc::clone(&entry.body))
        };
        let body = body.ok_or_else(|| {
            RuntimeError::new(format!("{} has no static setter named '{}'", key, name))
        })?;
        self.invoke(key, &body, &Value::Undefined, &[value])?;
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
