use thiserror::Error;

use crate::api::{CallbackError, ParameterDefinition};
use crate::constant::TRUE_TOKEN;
use crate::model::{join_values, Arity, ParameterKind, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The class of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tokens could not be read as the parameter: unknown name, wrong number of values, or a failed conversion.
    InputParsing,
    /// The commit callback failed.
    Setter,
    /// The validator itself failed (as opposed to rejecting a value).
    Validator,
    /// The validator rejected a value.
    /// This is the only kind retried by interactive parsing.
    InvalidParsedInput,
    /// The validator message generator failed.
    ValidatorMessageGenerator,
}

/// A failure to parse one parameter.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    kind: ErrorKind,
    parameter: String,
    message: String,
    #[source]
    cause: Option<CallbackError>,
}

impl ParseError {
    pub(crate) fn new(
        kind: ErrorKind,
        parameter: impl Into<String>,
        message: impl Into<String>,
        cause: Option<CallbackError>,
    ) -> Self {
        Self {
            kind,
            parameter: parameter.into(),
            message: message.into(),
            cause,
        }
    }

    /// The class of this failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The primary name of the parameter that failed.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// The human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, when there is one.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The details of a [`ErrorKind::Setter`] failure.
    pub fn setter_failure(&self) -> Option<&SetterFailure> {
        self.cause()
            .and_then(|cause| cause.downcast_ref::<SetterFailure>())
    }
}

/// A commit callback failure, along with what was being committed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SetterFailure {
    parameter: String,
    kind: ParameterKind,
    values: Vec<Value>,
    message: String,
    #[source]
    source: CallbackError,
}

impl SetterFailure {
    pub(crate) fn new(
        parameter: impl Into<String>,
        kind: ParameterKind,
        values: Vec<Value>,
        source: CallbackError,
    ) -> Self {
        let parameter = parameter.into();
        let message = format!(
            "parameter '{parameter}' could not commit {kind} value(s) [{values}]: {source}",
            values = join_values(&values),
        );
        Self {
            parameter,
            kind,
            values,
            message,
            source,
        }
    }

    /// The primary name of the parameter.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// The data kind of the parameter.
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The values that were being committed.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// The type erased values of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Committed {
    /// The single value of a scalar parameter.
    Scalar(Value),
    /// The values of an array parameter, in token order.
    Array(Vec<Value>),
}

/// A successful parse of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    kind: ParameterKind,
    committed: Committed,
}

impl Parsed {
    /// The data kind of the parameter.
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// What was committed.
    pub fn committed(&self) -> &Committed {
        &self.committed
    }

    /// What was committed, as a slice regardless of arity.
    pub fn values(&self) -> &[Value] {
        match &self.committed {
            Committed::Scalar(value) => std::slice::from_ref(value),
            Committed::Array(values) => values,
        }
    }
}

/// The outcome of parsing one parameter.
pub type ParseOutcome = Result<Parsed, ParseError>;

/// Behaviour to convert, validate and commit the value tokens of a parameter.
///
/// We use this at the middle/top of the parameter object graph so that parameters of every type may live in a single registry.
pub(crate) trait AnonymousBinding {
    /// Bind the value tokens (the name token excluded) of the parameter named `parameter`.
    fn bind(&self, parameter: &str, tokens: &[&str]) -> Result<Committed, ParseError>;
}

/// Parse the slice `tokens[offset..offset + len]` as `definition`.
///
/// The first token of the slice must be the parameter's name, or one of its aliases.
/// The values are converted and validated in order, and only then committed (once).
/// A scalar flag given no value is read as `true`.
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::{parse_slice, Committed, Parameter, Scalar, Value};
///
/// let mut regex: bool = false;
/// let definition = Parameter::new(Scalar::new(&mut regex), "-regex").build();
/// let parsed = parse_slice(&definition, &["-x", "-regex"], 1, 1).unwrap();
/// assert_eq!(parsed.committed(), &Committed::Scalar(Value::Flag(true)));
/// drop(definition);
/// assert!(regex);
/// ```
pub fn parse_slice<S: AsRef<str>>(
    definition: &ParameterDefinition,
    tokens: &[S],
    offset: usize,
    len: usize,
) -> ParseOutcome {
    let slice = offset
        .checked_add(len)
        .and_then(|end| tokens.get(offset..end))
        .unwrap_or(&[]);

    let (name, values) = match slice.split_first() {
        Some((name, values)) => (name.as_ref(), values),
        None => {
            return Err(ParseError::new(
                ErrorKind::InputParsing,
                definition.name(),
                format!(
                    "parameter '{p}' cannot parse the slice at offset {offset} of length {len}, from {n} token(s).",
                    p = definition.name(),
                    n = tokens.len(),
                ),
                None,
            ));
        }
    };

    if !definition.answers_to(name) {
        return Err(ParseError::new(
            ErrorKind::InputParsing,
            definition.name(),
            format!(
                "unknown argument name '{name}' for parameter '{p}'.",
                p = definition.name()
            ),
            None,
        ));
    }

    let mut values: Vec<&str> = values.iter().map(AsRef::as_ref).collect();

    if definition.arity() == Arity::Scalar {
        if values.is_empty() && definition.kind() == ParameterKind::Flag {
            values.push(TRUE_TOKEN);
        }

        if values.len() != 1 {
            return Err(ParseError::new(
                ErrorKind::InputParsing,
                definition.name(),
                format!(
                    "parameter '{p}' expected one argument of type {kind}, but found {n}.",
                    p = definition.name(),
                    kind = definition.kind(),
                    n = values.len(),
                ),
                None,
            ));
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Binding {definition:?} to {values:?}.");
    }

    let committed = definition.bind(&values)?;

    Ok(Parsed {
        kind: definition.kind(),
        committed,
    })
}
