use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The data kind of a parameter.
///
/// Every value a parameter commits is converted from its token according to this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// A boolean, written precisely as `true` or `false`.
    Flag,
    /// A signed 64 bit integer.
    Integer,
    /// A 64 bit floating point number.
    Float,
    /// Any text, taken verbatim.
    Text,
    /// A platform file system path.
    Path,
    /// One of a fixed table of named values.
    Enum,
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParameterKind::Flag => "flag",
            ParameterKind::Integer => "integer",
            ParameterKind::Float => "float",
            ParameterKind::Text => "text",
            ParameterKind::Path => "path",
            ParameterKind::Enum => "enum",
        };
        write!(f, "{name}")
    }
}

/// Whether a parameter takes precisely one value, or a collection of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Precisely one value (a flag may omit it, meaning `true`).
    Scalar,
    /// Zero or more values, committed together.
    Array,
}

/// A converted value, with its type erased down to the declared [`ParameterKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A [`ParameterKind::Flag`] value.
    Flag(bool),
    /// A [`ParameterKind::Integer`] value.
    Integer(i64),
    /// A [`ParameterKind::Float`] value.
    Float(f64),
    /// A [`ParameterKind::Text`] value.
    Text(String),
    /// A [`ParameterKind::Path`] value.
    Path(PathBuf),
    /// A [`ParameterKind::Enum`] value, identified by its name in the table.
    Enum(String),
}

impl Value {
    /// The kind this value was converted as.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Value::Flag(_) => ParameterKind::Flag,
            Value::Integer(_) => ParameterKind::Integer,
            Value::Float(_) => ParameterKind::Float,
            Value::Text(_) => ParameterKind::Text,
            Value::Path(_) => ParameterKind::Path,
            Value::Enum(_) => ParameterKind::Enum,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Flag(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::Path(value) => write!(f, "{}", value.display()),
            Value::Enum(value) => write!(f, "{value}"),
        }
    }
}

pub(crate) fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
