use std::cell::RefCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runtime::class::ClassKey;

/// Shared, mutable reference to a class instance.
pub type ObjectRef = Rc<RefCell<ObjectData>>;

/// The payload of a class instance: the class it was constructed from and
/// its dynamic fields, in insertion order.
pub struct ObjectData {
    pub class: ClassKey,
    pub fields: IndexMap<String, Value>,
}

/// Dynamic value flowing through constructors, methods and assertions.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(ObjectRef),
}

impl Value {
    /// Allocate a fresh, empty instance of `class`.
    pub fn object(class: ClassKey) -> Value {
        Value::Object(Rc::new(RefCell::new(ObjectData {
            class,
            fields: IndexMap::new(),
        })))
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }
}

/// Nesting depth at which object rendering stops descending, so cyclic
/// instances still render in finite space.
const MAX_DISPLAY_DEPTH: usize = 4;

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_at_depth(f, 0)
    }
}

impl Value {
    fn fmt_at_depth(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => {
                // The integral render only holds where i64 is exact.
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e18 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Object(o) => {
                let data = o.borrow();
                if depth >= MAX_DISPLAY_DEPTH {
                    return write!(f, "{}{{ ... }}", data.class.name());
                }
                write!(f, "{}{{ ", data.class.name())?;
                for (name, value) in &data.fields {
                    write!(f, "{}:", name)?;
                    value.fmt_at_depth(f, depth + 1)?;
                    write!(f, "; ")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Object(o) => write!(f, "Value::Object({})", o.borrow().class),
        }
    }
}

/// Strict equality: same type, same value; objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::class::ClassKey;

    #[test]
    fn objects_compare_by_identity() {
        let key = ClassKey::new("m", "Point");
        let a = Value::object(key.clone());
        let b = Value::object(key);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(101.0).to_string(), "101");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn huge_integral_numbers_do_not_saturate() {
        assert_eq!(Value::Number(1e19).to_string(), "10000000000000000000");
        assert_eq!(Value::Number(-1e19).to_string(), "-10000000000000000000");
        assert_eq!(
            Value::Number(f64::INFINITY).to_string(),
            f64::INFINITY.to_string()
        );
    }

    #[test]
    fn cyclic_objects_render_in_finite_space() {
        let obj = Value::object(ClassKey::new("m", "Loop"));
        let myself = obj.clone();
        if let Value::Object(o) = &obj {
            o.borrow_mut().fields.insert("me".to_string(), myself);
        }
        let rendered = obj.to_string();
        assert!(rendered.starts_with("Loop{ me:Loop{"));
        assert!(rendered.contains("Loop{ ... }"));
    }

    #[test]
    fn truthiness_follows_the_usual_table() {
        assert!(!Value::Undefined.truthy());
        assert!(!Value::Null.truthy());
        assert!(!Value::Number(0.0).truthy());
        assert!(!Value::string("").truthy());
        assert!(Value::Number(-1.0).truthy());
        assert!(Value::string("x").truthy());
    }
}
