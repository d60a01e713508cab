//! `paramset` parses command line style tokens into typed, validated values.
//!
//! A *parameter set* is a collection of named parameters.
//! Each parameter declares a data kind, whether it takes one value or many, and a *field* which receives the parsed value(s).
//! Parsing proceeds in two stages:
//! * *Batch parsing*:
//! The tokens are partitioned by the names of the parameters in the set, and each named parameter is parsed from its tokens.
//! * *Interactive parsing* (optional):
//! Every required parameter that is still missing is requested, one line of input at a time.
//! A value rejected by the parameter's validator is requested again, a bounded number of times.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/task_runner.rs")]
//! ```
//!
//! This generates the following program:
//! ```console
//! $ task_runner -loops 3 -name build
//! Running 'build' 3 time(s) (regex: false, unit: SECONDS).
//!
//! $ task_runner -regex -unit MINUTES
//! loop count: 12
//! 12 is not between 1 and 10
//! loop count: help
//! '-loopCount integer', '-loops' (required) - how many times to run the task
//! loop count: 2
//! task name: build*
//! Running 'build*' 2 time(s) (regex: true, unit: MINUTES).
//!
//! $ task_runner -h -loops 1 -name x
//!   '-help', '-h' - displays this help message
//!   '-loopCount integer', '-loops' (required) - how many times to run the task
//!   '-regex [false]' - match the task name as a regular expression
//!   '-name text' (required) - the task to run
//!   '-unit enum' (one of: [SECONDS, MINUTES]) - the unit of the reported run time
//!
//! Running 'x' 1 time(s) (regex: false, unit: SECONDS).
//! ```
//!
//! # Parameters
//! Configure a [`ParameterSet`] by starting with [`ParameterSet::builder`] and `add`ing parameters.
//!
//! The data kind of a [`Parameter`] follows from the type of its field:
//!
//! | Type      | Kind                       | Tokens                                      |
//! |-----------|----------------------------|---------------------------------------------|
//! | `bool`    | [`ParameterKind::Flag`]    | precisely `true` or `false`                 |
//! | `i64`     | [`ParameterKind::Integer`] | as per [`i64::from_str`](std::str::FromStr) |
//! | `f64`     | [`ParameterKind::Float`]   | as per [`f64::from_str`](std::str::FromStr) |
//! | `String`  | [`ParameterKind::Text`]    | any                                         |
//! | `PathBuf` | [`ParameterKind::Path`]    | any, without a NUL character                |
//!
//! Enumerated parameters ([`ParameterKind::Enum`]) accept the names of a fixed table of values, via [`Parameter::enumeration`] or [`Parameter::variants`].
//!
//! The field decides whether the parameter takes one value, or many:
//! * [`Scalar`] takes precisely one value.
//! A scalar flag may also be named without a value, which means `true`.
//! * [`Array`] takes any number of values (including none), and commits them all at once.
//!
//! ```
//! use paramset::{Array, Parameter, ParameterSet, Scalar};
//!
//! let mut verbose: bool = false;
//! let mut sizes: Vec<i64> = Vec::default();
//! let set = ParameterSet::builder()
//!     .add(Parameter::new(Scalar::new(&mut verbose), "-verbose").alias("-v"))
//!     .add(Parameter::new(Array::new(&mut sizes), "-sizes"))
//!     .build();
//!
//! set.parse(&["-sizes", "1", "2", "-v"], 0, &mut std::io::sink()).unwrap();
//! drop(set);
//!
//! assert!(verbose);
//! assert_eq!(sizes, vec![1, 2]);
//! ```
//!
//! ### Validation
//! A validator accepts or rejects each parsed value before anything is committed.
//! The rejection is described by the validator message, or a default message.
//!
//! ```
//! use paramset::{ErrorKind, Parameter, ParameterSet, Scalar};
//!
//! let mut loops: i64 = 0;
//! let set = ParameterSet::builder()
//!     .add(
//!         Parameter::new(Scalar::new(&mut loops), "-loops")
//!             .validator(|value| *value < 10)
//!             .validator_message(|value| format!("{value} is too many")),
//!     )
//!     .build();
//!
//! let error = set.parse(&["-loops", "15"], 0, &mut std::io::sink()).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::InvalidParsedInput);
//! assert_eq!(error.message(), "15 is too many");
//! drop(set);
//!
//! // Nothing was committed.
//! assert_eq!(loops, 0);
//! ```
//!
//! ### Errors
//! Every failure is a [`ParseError`], classified by its [`ErrorKind`]:
//! * [`ErrorKind::InputParsing`]: an unknown name, the wrong number of values, or a token that does not convert.
//! * [`ErrorKind::InvalidParsedInput`]: the validator rejected a value.
//! * [`ErrorKind::Validator`] & [`ErrorKind::ValidatorMessageGenerator`]: the validator (or its message) failed.
//! * [`ErrorKind::Setter`]: the field's commit failed (see [`SetterFailure`]).
//!
//! Only [`ErrorKind::InvalidParsedInput`] is requested again during interactive parsing, and only for a value entered at a prompt.
//! A failure among the initial tokens ends parsing, interactive or not.
//!
//! ### Defaults
//! `paramset` does not set defaults.
//! A parameter which is not named (and not requested interactively) never touches its field, so the variable keeps its initial value.
//!
//! # Debugging
//! Enable the `tracing_debug` feature to emit `tracing` debug events while parsing.
pub use paramset_builder::*;
