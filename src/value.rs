//! Runtime values.
//!
//! A tagged variant mirroring the type kinds: Invalid flows through
//! computation instead of raising, files are filename payloads that may or
//! may not exist on disk, and functions are host closures over exactly one
//! argument (curried application nests closures).

use std::fmt;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

#[derive(Clone)]
pub enum Value {
    /// Result of an ill-typed node or a failed runtime operation.
    Invalid,
    /// The argument fed to nullary functions on automatic application.
    Unit,
    Int(i64),
    Str(Rc<str>),
    File(Rc<str>),
    Vector(Rc<Vec<Value>>),
    Fn(Rc<FnValue>),
}

/// A first-class function: a host closure from one value to one value.
/// Partial application is expressed by returning another `Fn` that has
/// captured the earlier arguments.
pub struct FnValue {
    func: Box<dyn Fn(&Value) -> Value>,
}

impl fmt::Debug for FnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnValue")
    }
}

impl Value {
    pub fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub fn file(name: &str) -> Value {
        Value::File(Rc::from(name))
    }

    pub fn vector(values: Vec<Value>) -> Value {
        Value::Vector(Rc::new(values))
    }

    pub fn function(f: impl Fn(&Value) -> Value + 'static) -> Value {
        Value::Fn(Rc::new(FnValue { func: Box::new(f) }))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    /// Uniform call. Anything that is not a function yields Invalid.
    pub fn call(&self, arg: &Value) -> Value {
        match self {
            Value::Fn(f) => (f.func)(arg),
            _ => Value::Invalid,
        }
    }

    pub fn as_filename(&self) -> Option<&str> {
        match self {
            Value::File(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(values) => Some(values),
            _ => None,
        }
    }

    /// Natural textual form, used by the scalar and table renderers.
    /// Single-line strings are quoted; the string printer strips quotes for
    /// multi-line text itself.
    pub fn text(&self) -> String {
        match self {
            Value::Invalid => "<invalid>".to_string(),
            Value::Unit => "()".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Str(s) => format!("\"{}\"", s),
            Value::File(name) => name.to_string(),
            Value::Vector(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.text()).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Fn(_) => "<fn>".to_string(),
        }
    }

    /// Terminal display width of [`Value::text`], in columns.
    pub fn width(&self) -> usize {
        self.text().as_str().width()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => f.write_str("Invalid"),
            Value::Unit => f.write_str("Unit"),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::File(name) => write!(f, "File({:?})", name),
            Value::Vector(values) => f.debug_list().entries(values.iter()).finish(),
            Value::Fn(_) => f.write_str("Fn"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Invalid, Value::Invalid) => true,
            (Value::Unit, Value::Unit) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::File(a), Value::File(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
