use std::fmt;

/// Error raised while declaring classes, methods or mixins.
///
/// Declaration errors are never caught inside the library; they propagate to
/// whichever code is loading the class definitions.
#[derive(Debug)]
pub enum DeclareError {
    /// Malformed input: missing module id, anonymous declarable, and so on.
    InvalidDeclaration(String),
    /// The full class name is already registered.
    DuplicateClass(String),
    /// The (class, method) pair already exists in the targeted table.
    DuplicateMethod(String, String),
    /// A method or super dispatcher was requested with no open class
    /// for the module.
    NoOpenClass(String),
    /// A mixin entry's storage key disagrees with its function's name.
    NameMismatch(String, String),
}

impl fmt::Display for DeclareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclareError::InvalidDeclaration(msg) => {
                write!(f, "invalid declaration: {}", msg)
            }
            DeclareError::DuplicateClass(name) => {
                write!(f, "class is already defined: {}", name)
            }
            DeclareError::DuplicateMethod(class, method) => {
                write!(f, "method is already defined in class: {}.{}", class, method)
            }
            DeclareError::NoOpenClass(module) => {
                write!(f, "no class currently defined for module: {}", module)
            }
            DeclareError::NameMismatch(key, name) => {
                write!(f, "mixin entry '{}' names a function called '{}'", key, name)
            }
        }
    }
}

impl std::error::Error for DeclareError {}

/// Error raised by running native bodies: constructors, methods, accessors
/// and test bodies.
///
/// Assertion failures raised by the test helpers carry the `is_assertion`
/// flag so the runner can classify them apart from arbitrary errors.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    message: String,
    is_assertion: bool,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
            is_assertion: false,
        }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
            is_assertion: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_assertion(&self) -> bool {
        self.is_assertion
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}
