use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{HelpParameter, ParameterDefinition, ParameterSetBuilder};
use crate::constant::MAX_PARSE_ATTEMPTS;
use crate::matcher::{CompletionMap, ParameterId, Registry, Segmenter};
use crate::model::{Arity, ParameterKind, Value};
use crate::parser::base::{parse_slice, ErrorKind, ParseError, ParseOutcome, SetterFailure};
use crate::parser::interface::LineSource;
use crate::parser::printer::{describe, Printer};
use crate::tokens::Tokenizer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A failure of interactive parsing.
#[derive(Debug, Error)]
pub enum InteractiveError {
    /// A parameter failed in a way that is not retried.
    #[error(transparent)]
    Parameter(#[from] ParseError),
    /// Every attempt at entering the parameter was rejected by its validator.
    #[error("parameter '{parameter}' was rejected {attempts} times, most recently: {source}")]
    AttemptsExhausted {
        /// The primary name of the parameter.
        parameter: String,
        /// The number of rejected attempts.
        attempts: usize,
        /// The final rejection.
        source: ParseError,
    },
    /// The input ended while a parameter was being requested.
    #[error("input ended while requesting parameter '{0}'.")]
    InputClosed(String),
    /// Reading the input or writing the output failed.
    #[error("interactive i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl InteractiveError {
    /// The class of the underlying parse failure, when there is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            InteractiveError::Parameter(error) => Some(error.kind()),
            InteractiveError::AttemptsExhausted { source, .. } => Some(source.kind()),
            InteractiveError::InputClosed(_) | InteractiveError::Io(_) => None,
        }
    }
}

struct HelpState {
    id: ParameterId,
    message: String,
    // Written by the help parameter's commit, drained into the output of the current parse.
    pending: Rc<RefCell<String>>,
}

/// A configured set of parameters.
/// Built via [`ParameterSet::builder`], [`ParameterSet::new`] or [`ParameterSet::with_help`].
///
/// Parsing commits values through the parameters' fields, so the variables borrowed by those fields are available again once the set is dropped.
pub struct ParameterSet<'a> {
    registry: Registry<'a>,
    help: Option<HelpState>,
}

impl<'a> std::fmt::Debug for ParameterSet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterSet")
            .field("registry", &self.registry)
            .finish()
    }
}

impl<'a> ParameterSet<'a> {
    /// Start building a parameter set.
    pub fn builder() -> ParameterSetBuilder<'a> {
        ParameterSetBuilder::new()
    }

    /// Create a parameter set without a help parameter.
    pub fn new(definitions: Vec<ParameterDefinition<'a>>) -> Self {
        Self {
            registry: Registry::build(definitions),
            help: None,
        }
    }

    /// Create a parameter set with a synthesized help parameter, registered after every other parameter.
    pub fn with_help(mut definitions: Vec<ParameterDefinition<'a>>, help: HelpParameter) -> Self {
        let message = Printer::terminal().render_help(&help, &definitions);
        let pending = Rc::new(RefCell::new(String::default()));
        definitions.push(help.definition(message.clone(), pending.clone()));
        let id = ParameterId(definitions.len() - 1);

        Self {
            registry: Registry::build(definitions),
            help: Some(HelpState {
                id,
                message,
                pending,
            }),
        }
    }

    /// The registry of this parameter set.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// The help message, if the set has a help parameter.
    pub fn help_message(&self) -> Option<&str> {
        self.help.as_ref().map(|help| help.message.as_str())
    }

    /// Parse `tokens`, starting from `offset`.
    ///
    /// Each parameter named in the tokens is parsed in turn, and parsing stops at the first failure.
    /// When the help parameter is parsed as `true`, the help message is written to `output`.
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, ParameterSet, Scalar};
    ///
    /// let mut loops: i64 = 0;
    /// let mut regex: bool = false;
    /// let set = ParameterSet::builder()
    ///     .add(Parameter::new(Scalar::new(&mut loops), "-loops"))
    ///     .add(Parameter::new(Scalar::new(&mut regex), "-regex"))
    ///     .build();
    ///
    /// let completion = set.parse(&["-loops", "3", "-regex"], 0, &mut std::io::sink()).unwrap();
    /// assert!(completion.all_complete());
    /// drop(set);
    ///
    /// assert_eq!(loops, 3);
    /// assert!(regex);
    /// ```
    pub fn parse<S, W>(
        &self,
        tokens: &[S],
        offset: usize,
        output: &mut W,
    ) -> Result<CompletionMap, ParseError>
    where
        S: AsRef<str>,
        W: Write + ?Sized,
    {
        self.parse_batch(tokens, offset, output)
    }

    /// Tokenize `raw` (see [`Tokenizer::default`]) and parse the result.
    ///
    /// Escapes are disabled, so a backslash is an ordinary character: `"a=\"A\""` is read as the single token `a=\"A\"`, backslashes kept.
    /// Tokenize with [`Tokenizer::interactive`] and call [`ParameterSet::parse`] to honour escaped quotes.
    pub fn parse_line<W: Write + ?Sized>(
        &self,
        raw: &str,
        output: &mut W,
    ) -> Result<CompletionMap, ParseError> {
        let tokens = Tokenizer::default().tokenize(raw);
        self.parse(&tokens, 0, output)
    }

    /// Parse `tokens`, then request each required parameter that is still incomplete.
    ///
    /// For each such parameter, its prompt is written to `output` and one line is read from `input`:
    /// * A line equal to `help_trigger` writes the parameter's description and prompts again.
    /// * An array parameter's line is tokenized (see [`Tokenizer::interactive`]); a blank line means no values.
    /// * A scalar parameter's line is taken whole, as its value.
    ///
    /// A value rejected by the validator is reported to `output` and requested again, up to
    /// [`MAX_PARSE_ATTEMPTS`](crate::MAX_PARSE_ATTEMPTS) attempts.
    /// Any other failure ends interactive parsing.
    ///
    /// Any failure in `tokens` ends interactive parsing before anything is requested, just as it ends [`ParameterSet::parse`].
    /// This includes a value rejected by its validator, so no later value in `tokens` is silently skipped.
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, ParameterSet, Scalar};
    /// use std::io::Cursor;
    ///
    /// let mut name = String::default();
    /// let set = ParameterSet::builder()
    ///     .add(Parameter::new(Scalar::new(&mut name), "-name").prompt("name: ").required())
    ///     .build();
    ///
    /// let tokens: &[&str] = &[];
    /// let mut input = Cursor::new("task A\n");
    /// let mut output: Vec<u8> = Vec::default();
    /// set.parse_interactive(tokens, 0, &mut input, &mut output, "?").unwrap();
    /// drop(set);
    ///
    /// assert_eq!(name, "task A");
    /// assert_eq!(String::from_utf8(output).unwrap(), "name: ");
    /// ```
    pub fn parse_interactive<S, L, W>(
        &self,
        tokens: &[S],
        offset: usize,
        input: &mut L,
        output: &mut W,
        help_trigger: &str,
    ) -> Result<(), InteractiveError>
    where
        S: AsRef<str>,
        L: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        let completion = self.parse_batch(tokens, offset, output)?;

        for (id, definition) in self.registry.iter() {
            if completion.get(id) == Some(false) && definition.is_required() {
                self.request(definition, input, output, help_trigger)?;
            }
        }

        Ok(())
    }

    /// Interactive parsing, reading from standard input and writing to standard output.
    pub fn parse_interactive_console<S: AsRef<str>>(
        &self,
        tokens: &[S],
        offset: usize,
        help_trigger: &str,
    ) -> Result<(), InteractiveError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.parse_interactive(
            tokens,
            offset,
            &mut stdin.lock(),
            &mut stdout.lock(),
            help_trigger,
        )
    }

    fn parse_batch<S, W>(
        &self,
        tokens: &[S],
        offset: usize,
        output: &mut W,
    ) -> Result<CompletionMap, ParseError>
    where
        S: AsRef<str>,
        W: Write + ?Sized,
    {
        let mut completion = CompletionMap::new(&self.registry);

        if let Some(help) = &self.help {
            help.pending.borrow_mut().clear();
        }

        for slice in Segmenter::new(&self.registry, tokens, offset) {
            let definition = match self.registry.get(slice.id) {
                Some(definition) => definition,
                None => unreachable!("internal error - segments must identify a registered parameter"),
            };
            let outcome = parse_slice(definition, tokens, slice.start, slice.len)
                .and_then(|_| self.write_help(output));

            match outcome {
                Ok(()) => completion.complete(slice.id),
                Err(error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Aborting at {definition:?} (token {}): {error}", slice.start);
                    }

                    return Err(error);
                }
            }
        }

        Ok(completion)
    }

    fn write_help<W: Write + ?Sized>(&self, output: &mut W) -> Result<(), ParseError> {
        let help = match &self.help {
            Some(help) => help,
            None => return Ok(()),
        };
        let body = std::mem::take(&mut *help.pending.borrow_mut());

        match self.registry.get(help.id) {
            Some(definition) if !body.is_empty() => {
                let name = definition.name();

                output
                    .write_all(body.as_bytes())
                    .and_then(|_| output.flush())
                    .map_err(|error| {
                        let failure = SetterFailure::new(
                            name,
                            ParameterKind::Flag,
                            vec![Value::Flag(true)],
                            Box::new(error),
                        );
                        ParseError::new(
                            ErrorKind::Setter,
                            name,
                            failure.to_string(),
                            Some(Box::new(failure)),
                        )
                    })
            }
            _ => Ok(()),
        }
    }

    fn request<L, W>(
        &self,
        definition: &ParameterDefinition<'a>,
        input: &mut L,
        output: &mut W,
        help_trigger: &str,
    ) -> Result<(), InteractiveError>
    where
        L: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        let mut attempts = 0;

        loop {
            match self.attempt(definition, input, output, help_trigger)? {
                Ok(_) => return Ok(()),
                Err(error) if error.kind() == ErrorKind::InvalidParsedInput => {
                    attempts += 1;
                    writeln!(output, "{}", error.message())?;

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Attempt {attempts} of {MAX_PARSE_ATTEMPTS} rejected for {definition:?}.");
                    }

                    if attempts >= MAX_PARSE_ATTEMPTS {
                        return Err(InteractiveError::AttemptsExhausted {
                            parameter: definition.name().to_string(),
                            attempts,
                            source: error,
                        });
                    }
                }
                Err(error) => return Err(InteractiveError::Parameter(error)),
            }
        }
    }

    fn attempt<L, W>(
        &self,
        definition: &ParameterDefinition<'a>,
        input: &mut L,
        output: &mut W,
        help_trigger: &str,
    ) -> Result<ParseOutcome, InteractiveError>
    where
        L: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        write!(output, "{}", definition.prompt())?;
        output.flush()?;

        let line = loop {
            let line = input
                .next_line()?
                .ok_or_else(|| InteractiveError::InputClosed(definition.name().to_string()))?;

            if line != help_trigger {
                break line;
            }

            writeln!(output, "{}", describe(definition))?;
            write!(output, "{}", definition.prompt())?;
            output.flush()?;
        };

        let mut tokens = vec![definition.name().to_string()];

        match definition.arity() {
            Arity::Scalar => tokens.push(line),
            Arity::Array => {
                if !line.trim().is_empty() {
                    tokens.extend(Tokenizer::interactive().tokenize(&line));
                }
            }
        }

        Ok(parse_slice(definition, &tokens, 0, tokens.len()))
    }
}
