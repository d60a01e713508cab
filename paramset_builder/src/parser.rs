mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use base::AnonymousBinding;
pub use base::{parse_slice, Committed, ErrorKind, ParseError, ParseOutcome, Parsed, SetterFailure};
pub use interface::LineSource;
pub use middleware::{InteractiveError, ParameterSet};
