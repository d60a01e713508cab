use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::constant::{FALSE_TOKEN, TRUE_TOKEN};
use crate::model::{ParameterKind, Value};

/// The error type returned by fallible callbacks (setters, validators, validator message generators).
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Behaviour to convert a token into one of the primitive parameter types.
///
/// We use this at the bottom of the parameter object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait Primitive: Clone + Sized {
    /// The kind of parameter this type is parsed as.
    const KIND: ParameterKind;

    /// Convert a single token.
    fn from_token(token: &str) -> Result<Self, InvalidConversion>;

    /// Erase the type of this value.
    fn to_value(&self) -> Value;
}

#[derive(Debug, Error)]
#[doc(hidden)]
pub enum InvalidConversion {
    #[error("cannot convert '{token}' to {kind}.")]
    Malformed {
        token: String,
        kind: ParameterKind,
        #[source]
        cause: CallbackError,
    },
    #[error("cannot convert '{token}' to {kind}: {reason}.")]
    Rejected {
        token: String,
        kind: ParameterKind,
        reason: &'static str,
    },
    #[error("'{token}' is not one of [{}].", .choices.join(", "))]
    UnknownChoice { token: String, choices: Vec<String> },
}

impl Primitive for bool {
    const KIND: ParameterKind = ParameterKind::Flag;

    fn from_token(token: &str) -> Result<Self, InvalidConversion> {
        match token {
            TRUE_TOKEN => Ok(true),
            FALSE_TOKEN => Ok(false),
            _ => Err(InvalidConversion::Rejected {
                token: token.to_string(),
                kind: Self::KIND,
                reason: "expected 'true' or 'false'",
            }),
        }
    }

    fn to_value(&self) -> Value {
        Value::Flag(*self)
    }
}

impl Primitive for i64 {
    const KIND: ParameterKind = ParameterKind::Integer;

    fn from_token(token: &str) -> Result<Self, InvalidConversion> {
        i64::from_str(token).map_err(|error| malformed::<Self>(token, error))
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl Primitive for f64 {
    const KIND: ParameterKind = ParameterKind::Float;

    fn from_token(token: &str) -> Result<Self, InvalidConversion> {
        f64::from_str(token).map_err(|error| malformed::<Self>(token, error))
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Primitive for String {
    const KIND: ParameterKind = ParameterKind::Text;

    fn from_token(token: &str) -> Result<Self, InvalidConversion> {
        Ok(token.to_string())
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Primitive for PathBuf {
    const KIND: ParameterKind = ParameterKind::Path;

    fn from_token(token: &str) -> Result<Self, InvalidConversion> {
        if token.contains('\0') {
            Err(InvalidConversion::Rejected {
                token: token.escape_default().to_string(),
                kind: Self::KIND,
                reason: "paths cannot contain a NUL character",
            })
        } else {
            Ok(PathBuf::from(token))
        }
    }

    fn to_value(&self) -> Value {
        Value::Path(self.clone())
    }
}

fn malformed<T: Primitive>(
    token: &str,
    error: impl std::error::Error + Send + Sync + 'static,
) -> InvalidConversion {
    InvalidConversion::Malformed {
        token: token.to_string(),
        kind: T::KIND,
        cause: Box::new(error),
    }
}

/// The named values an enumerated parameter accepts.
pub(crate) struct ChoiceTable<T> {
    // Declaration order, for help output.
    names: Vec<String>,
    values: HashMap<String, T>,
}

impl<T> ChoiceTable<T> {
    pub(crate) fn new<N: Into<String>>(choices: impl IntoIterator<Item = (N, T)>) -> Self {
        let mut names = Vec::default();
        let mut values = HashMap::default();

        for (name, value) in choices {
            let name: String = name.into();
            if values.insert(name.clone(), value).is_none() {
                names.push(name);
            }
        }

        Self { names, values }
    }

    pub(crate) fn from_variants(variants: impl IntoIterator<Item = T>) -> Self
    where
        T: Display,
    {
        Self::new(
            variants
                .into_iter()
                .map(|variant| (variant.to_string(), variant)),
        )
    }
}

/// How tokens are converted into the typed values of one parameter.
pub(crate) enum Converter<T> {
    Primitive {
        kind: ParameterKind,
        convert: fn(&str) -> Result<T, InvalidConversion>,
        erase: fn(&T) -> Value,
    },
    Choices(ChoiceTable<T>),
}

impl<T: Primitive> Converter<T> {
    pub(crate) fn primitive() -> Self {
        Converter::Primitive {
            kind: T::KIND,
            convert: T::from_token,
            erase: T::to_value,
        }
    }
}

impl<T: Clone> Converter<T> {
    pub(crate) fn kind(&self) -> ParameterKind {
        match self {
            Converter::Primitive { kind, .. } => *kind,
            Converter::Choices(_) => ParameterKind::Enum,
        }
    }

    pub(crate) fn choices(&self) -> Option<Vec<String>> {
        match self {
            Converter::Primitive { .. } => None,
            Converter::Choices(table) => Some(table.names.clone()),
        }
    }

    /// Convert `token`, also producing its type erased form.
    pub(crate) fn convert(&self, token: &str) -> Result<(T, Value), InvalidConversion> {
        match self {
            Converter::Primitive { convert, erase, .. } => {
                let value = convert(token)?;
                let erased = erase(&value);
                Ok((value, erased))
            }
            Converter::Choices(table) => match table.values.get(token) {
                Some(value) => Ok((value.clone(), Value::Enum(token.to_string()))),
                None => Err(InvalidConversion::UnknownChoice {
                    token: token.to_string(),
                    choices: table.names.clone(),
                }),
            },
        }
    }
}
