use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::api::capture::{CallbackError, ChoiceTable, Converter, Primitive};
use crate::api::field::{GenericField, Scalar};
use crate::model::{Arity, ParameterKind, Value};
use crate::parser::{AnonymousBinding, Committed, ErrorKind, ParseError, SetterFailure};

type Validator<'a, T> = Box<dyn Fn(&T) -> Result<bool, CallbackError> + 'a>;
type MessageGenerator<'a, T> = Box<dyn Fn(&T) -> Result<String, CallbackError> + 'a>;

/// Converts, validates and commits the values of one parameter, keeping the field's type.
pub(crate) struct TypedBinding<'a, T> {
    converter: Converter<T>,
    field: RefCell<Box<dyn GenericField<T> + 'a>>,
    validator: Option<Validator<'a, T>>,
    message: Option<MessageGenerator<'a, T>>,
}

impl<'a, T: Clone> TypedBinding<'a, T> {
    fn rejection(&self, parameter: &str, value: &T, erased: &Value) -> ParseError {
        match &self.message {
            None => ParseError::new(
                ErrorKind::InvalidParsedInput,
                parameter,
                format!(
                    "invalid {kind} value '{erased}' for parameter '{parameter}'.",
                    kind = erased.kind()
                ),
                None,
            ),
            Some(generate) => match generate(value) {
                Ok(message) => ParseError::new(ErrorKind::InvalidParsedInput, parameter, message, None),
                Err(cause) => ParseError::new(
                    ErrorKind::ValidatorMessageGenerator,
                    parameter,
                    format!(
                        "validator message for parameter '{parameter}' could not be generated for {kind} value '{erased}'.",
                        kind = erased.kind()
                    ),
                    Some(cause),
                ),
            },
        }
    }
}

impl<'a, T: Clone> AnonymousBinding for TypedBinding<'a, T> {
    fn bind(&self, parameter: &str, tokens: &[&str]) -> Result<Committed, ParseError> {
        let kind = self.converter.kind();
        let mut values = Vec::with_capacity(tokens.len());
        let mut erased = Vec::with_capacity(tokens.len());

        for token in tokens {
            let (value, value_erased) = self.converter.convert(token).map_err(|error| {
                ParseError::new(
                    ErrorKind::InputParsing,
                    parameter,
                    format!("parameter '{parameter}': {error}"),
                    Some(Box::new(error)),
                )
            })?;
            values.push(value);
            erased.push(value_erased);
        }

        // Every value must pass before anything is committed.
        if let Some(validator) = &self.validator {
            for (value, value_erased) in values.iter().zip(erased.iter()) {
                match validator(value) {
                    Ok(true) => {}
                    Ok(false) => return Err(self.rejection(parameter, value, value_erased)),
                    Err(cause) => {
                        return Err(ParseError::new(
                            ErrorKind::Validator,
                            parameter,
                            format!("validator for parameter '{parameter}' failed on {kind} value '{value_erased}'."),
                            Some(cause),
                        ));
                    }
                }
            }
        }

        let mut field = self.field.borrow_mut();
        let arity = field.arity();
        field.commit(values).map_err(|source| {
            let failure = SetterFailure::new(parameter, kind, erased.clone(), source);
            ParseError::new(
                ErrorKind::Setter,
                parameter,
                failure.to_string(),
                Some(Box::new(failure)),
            )
        })?;

        match arity {
            Arity::Scalar => match erased.pop() {
                Some(value) => Ok(Committed::Scalar(value)),
                None => unreachable!("internal error - a scalar commit must carry precisely 1 value"),
            },
            Arity::Array => Ok(Committed::Array(erased)),
        }
    }
}

/// A parameter under construction.
///
/// The data kind follows from the field's type (see [`Parameter::new`]), or from a table of named values (see [`Parameter::enumeration`]).
/// Whether the parameter takes one value or many follows from the field: [`Scalar`] or [`Array`](crate::Array).
/// Once configured, the parameter is added to a [`ParameterSetBuilder`](crate::ParameterSetBuilder), or built directly into a [`ParameterDefinition`].
pub struct Parameter<'a, T> {
    name: String,
    aliases: Vec<String>,
    help: Option<String>,
    prompt: Option<String>,
    required: bool,
    converter: Converter<T>,
    field: Box<dyn GenericField<T> + 'a>,
    validator: Option<Validator<'a, T>>,
    message: Option<MessageGenerator<'a, T>>,
}

impl<'a, T: Primitive + 'a> Parameter<'a, T> {
    /// Create a parameter for one of the primitive kinds, decided by the type of the field:
    ///
    /// | Type      | Kind                       |
    /// |-----------|----------------------------|
    /// | `bool`    | [`ParameterKind::Flag`]    |
    /// | `i64`     | [`ParameterKind::Integer`] |
    /// | `f64`     | [`ParameterKind::Float`]   |
    /// | `String`  | [`ParameterKind::Text`]    |
    /// | `PathBuf` | [`ParameterKind::Path`]    |
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Array, Parameter, Scalar};
    /// use std::path::PathBuf;
    ///
    /// let mut verbose: bool = false;
    /// let mut inputs: Vec<PathBuf> = Vec::default();
    /// Parameter::new(Scalar::new(&mut verbose), "-verbose");
    /// Parameter::new(Array::new(&mut inputs), "-inputs");
    /// ```
    pub fn new(field: impl GenericField<T> + 'a, name: impl Into<String>) -> Self {
        Self::with_converter(field, name, Converter::primitive())
    }
}

impl<'a, T: Clone + 'a> Parameter<'a, T> {
    /// Create an enumerated parameter, which accepts precisely the names of `choices` (case sensitive).
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, Scalar};
    ///
    /// let mut level: u8 = 0;
    /// Parameter::enumeration(Scalar::new(&mut level), "-level", [("LOW", 1), ("HIGH", 9)]);
    /// ```
    pub fn enumeration<N: Into<String>>(
        field: impl GenericField<T> + 'a,
        name: impl Into<String>,
        choices: impl IntoIterator<Item = (N, T)>,
    ) -> Self {
        Self::with_converter(field, name, Converter::Choices(ChoiceTable::new(choices)))
    }

    /// Create an enumerated parameter, naming each variant by its [`Display`].
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, Scalar};
    ///
    /// #[derive(Clone)]
    /// enum TimeUnit {
    ///     Seconds,
    ///     Minutes,
    /// }
    /// # impl std::fmt::Display for TimeUnit {
    /// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    /// #         match self {
    /// #             TimeUnit::Seconds => write!(f, "SECONDS"),
    /// #             TimeUnit::Minutes => write!(f, "MINUTES"),
    /// #         }
    /// #     }
    /// # }
    ///
    /// let mut unit = TimeUnit::Seconds;
    /// Parameter::variants(
    ///     Scalar::new(&mut unit),
    ///     "-unit",
    ///     [TimeUnit::Seconds, TimeUnit::Minutes],
    /// );
    /// ```
    pub fn variants(
        field: impl GenericField<T> + 'a,
        name: impl Into<String>,
        variants: impl IntoIterator<Item = T>,
    ) -> Self
    where
        T: Display,
    {
        Self::with_converter(
            field,
            name,
            Converter::Choices(ChoiceTable::from_variants(variants)),
        )
    }

    fn with_converter(
        field: impl GenericField<T> + 'a,
        name: impl Into<String>,
        converter: Converter<T>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::default(),
            help: None,
            prompt: None,
            required: false,
            converter,
            field: Box::new(field),
            validator: None,
            message: None,
        }
    }

    /// Add an alternative name for this parameter.
    /// Repeat to add multiple aliases.
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, Scalar};
    ///
    /// let mut loops: i64 = 0;
    /// Parameter::new(Scalar::new(&mut loops), "-loopCount")
    ///     .alias("-loops")
    ///     .alias("-loop-count");
    /// ```
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Document the help message for this parameter.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Set the prompt written when this parameter is requested interactively.
    /// If repeated, only the final prompt will apply.
    pub fn prompt(mut self, message: impl Into<String>) -> Self {
        self.prompt.replace(message.into());
        self
    }

    /// Mark this parameter as required, so that interactive parsing requests it when it is missing.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept only the values for which `predicate` holds.
    /// Array parameters apply the predicate to each value, in order.
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, Scalar};
    ///
    /// let mut loops: i64 = 0;
    /// Parameter::new(Scalar::new(&mut loops), "-loops")
    ///     .validator(|value| (1..=10).contains(value))
    ///     .validator_message(|value| format!("{value} is not between 1 and 10"));
    /// ```
    pub fn validator(self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.try_validator(move |value: &T| Ok::<bool, CallbackError>(predicate(value)))
    }

    /// Accept only the values for which a fallible `predicate` holds.
    /// An `Err` from the predicate fails the parse with [`ErrorKind::Validator`].
    pub fn try_validator<E>(mut self, predicate: impl Fn(&T) -> Result<bool, E> + 'a) -> Self
    where
        E: Into<CallbackError>,
    {
        self.validator.replace(Box::new(
            move |value: &T| -> Result<bool, CallbackError> { predicate(value).map_err(Into::into) },
        ));
        self
    }

    /// Describe why a value was rejected by the validator.
    pub fn validator_message(self, generator: impl Fn(&T) -> String + 'a) -> Self {
        self.try_validator_message(move |value: &T| Ok::<String, CallbackError>(generator(value)))
    }

    /// Describe why a value was rejected by the validator, with a fallible `generator`.
    /// An `Err` from the generator fails the parse with [`ErrorKind::ValidatorMessageGenerator`].
    pub fn try_validator_message<E>(
        mut self,
        generator: impl Fn(&T) -> Result<String, E> + 'a,
    ) -> Self
    where
        E: Into<CallbackError>,
    {
        self.message.replace(Box::new(
            move |value: &T| -> Result<String, CallbackError> { generator(value).map_err(Into::into) },
        ));
        self
    }

    /// Finish this parameter.
    pub fn build(self) -> ParameterDefinition<'a> {
        let Parameter {
            name,
            aliases,
            help,
            prompt,
            required,
            converter,
            field,
            validator,
            message,
        } = self;

        ParameterDefinition {
            kind: converter.kind(),
            arity: field.arity(),
            choices: converter.choices(),
            name,
            aliases,
            help,
            prompt,
            required,
            binding: Box::new(TypedBinding {
                converter,
                field: RefCell::new(field),
                validator,
                message,
            }),
        }
    }
}

/// A finished, immutable parameter, with the type of its values erased.
pub struct ParameterDefinition<'a> {
    name: String,
    aliases: Vec<String>,
    kind: ParameterKind,
    arity: Arity,
    required: bool,
    help: Option<String>,
    prompt: Option<String>,
    choices: Option<Vec<String>>,
    binding: Box<dyn AnonymousBinding + 'a>,
}

impl<'a> ParameterDefinition<'a> {
    /// The primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alternative names, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The primary name followed by the aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `token` is the primary name or one of the aliases.
    pub fn answers_to(&self, token: &str) -> bool {
        self.names().any(|name| name == token)
    }

    /// The data kind.
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The arity.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether interactive parsing requests this parameter when it is missing.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The help message, if documented.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The interactive prompt, defaulting to one derived from the primary name.
    pub fn prompt(&self) -> String {
        match &self.prompt {
            Some(prompt) => prompt.clone(),
            None => format!("enter '{}': ", self.name),
        }
    }

    /// The accepted names of an enumerated parameter.
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    pub(crate) fn bind(&self, tokens: &[&str]) -> Result<Committed, ParseError> {
        self.binding.bind(&self.name, tokens)
    }
}

impl<'a> std::fmt::Debug for ParameterDefinition<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arity = match self.arity {
            Arity::Scalar => "",
            Arity::Array => "[]",
        };
        let required = if self.required { ", required" } else { "" };

        write!(
            f,
            "Parameter[{kind}{arity}, {names}{required}]",
            kind = self.kind,
            names = self.names().collect::<Vec<&str>>().join("|"),
        )
    }
}

/// The parameter that requests the help message.
///
/// It is a scalar flag; when parsed as `true`, the help message of every parameter in the set is written to the output of that parse.
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::{HelpParameter, Parameter, ParameterSet, Scalar};
///
/// let mut name = String::default();
/// let set = ParameterSet::builder()
///     .add(Parameter::new(Scalar::new(&mut name), "-name").help("the task name"))
///     .help(HelpParameter::new("-help").alias("-h"))
///     .build();
/// let mut output: Vec<u8> = Vec::default();
/// set.parse(&["-h"], 0, &mut output).unwrap();
/// assert!(String::from_utf8(output).unwrap().contains("the task name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpParameter {
    name: String,
    aliases: Vec<String>,
}

impl HelpParameter {
    /// Create a help parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::default(),
        }
    }

    /// Add an alternative name for the help parameter.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// The primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alternative names, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The flag definition, whose commit of `true` writes `message` into `sink`.
    pub(crate) fn definition<'a>(
        &self,
        message: String,
        sink: Rc<RefCell<String>>,
    ) -> ParameterDefinition<'a> {
        let field = Scalar::with(move |flag: bool| {
            if flag {
                sink.borrow_mut().push_str(&message);
            }
        });

        self.aliases
            .iter()
            .fold(Parameter::new(field, self.name.clone()), |parameter, alias| {
                parameter.alias(alias.clone())
            })
            .help("displays this help message")
            .build()
    }
}
