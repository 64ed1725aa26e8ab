use indexmap::IndexMap;

use crate::runtime::class::ClassHandle;
use crate::runtime::declarable::Declarable;

/// A named bag of functions copied into a class's instance methods when
/// applied. Application copies by value: mutating the mixin afterwards
/// does not touch classes it was already applied to.
#[derive(Clone, Debug)]
pub struct Mixin {
    name: String,
    entries: IndexMap<String, Declarable>,
}

impl Mixin {
    pub fn new(name: impl Into<String>) -> Mixin {
        Mixin {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Snapshot another class's own instance-method table as a mixin.
    pub fn from_class(class: &ClassHandle) -> Mixin {
        let mut mixin = Mixin::new(class.name());
        for name in class.own_instance_method_names() {
            if let Some((decl_name, body)) =
                class.registry().instance_method_declarable(class.key(), &name)
            {
                mixin.entries.insert(decl_name, body);
            }
        }
        mixin
    }

    /// Add an entry under `storage_key`. The key is allowed to disagree
    /// with the declarable's own name here; the mismatch is rejected at
    /// application time, not insertion time.
    pub fn add(&mut self, storage_key: impl Into<String>, decl: Declarable) -> &mut Mixin {
        self.entries.insert(storage_key.into(), decl);
        self
    }

    pub fn remove(&mut self, storage_key: &str) -> Option<Declarable> {
        self.entries.shift_remove(storage_key)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Declarable)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
