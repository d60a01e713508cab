//! Builder module for `paramset`.
//! See the `paramset` crate root for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
mod tokens;

pub use api::*;
pub use matcher::{CompletionMap, ParameterId, Registry, Segmenter, Slice};
pub use model::*;
pub use parser::{
    parse_slice, Committed, ErrorKind, InteractiveError, LineSource, ParameterSet, ParseError,
    ParseOutcome, Parsed, SetterFailure,
};
pub use tokens::Tokenizer;

/// The total number of attempts an interactive prompt makes for one parameter.
///
/// The first request counts as an attempt, so the prompt gives up on the parameter at its 10th rejected value
/// (rather than allowing 10 retries after the first) with [`InteractiveError::AttemptsExhausted`].
/// A line matching the help trigger is not an attempt.
pub const MAX_PARSE_ATTEMPTS: usize = constant::MAX_PARSE_ATTEMPTS;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
