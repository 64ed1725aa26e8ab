//! The class system: registry, builder, method attachment, mixins and
//! super dispatch over a dynamic object runtime.

pub mod class;
pub mod declarable;
pub mod error;
pub mod globals;
pub mod invoke;
pub mod mixin;
pub mod ops;
pub mod registry;
pub mod supers;
pub mod value;

pub use self::class::{ClassHandle, ClassKey, MethodFlags, MethodMetadata};
pub use self::declarable::{Declarable, Module};
pub use self::error::{DeclareError, RuntimeError};
pub use self::invoke::{CallContext, NativeFn};
pub use self::mixin::Mixin;
pub use self::registry::Registry;
pub use self::supers::SuperDispatcher;
pub use self::value::{ObjectData, ObjectRef, Value};
