pub(crate) const MAX_PARSE_ATTEMPTS: usize = 10;

pub(crate) const DEFAULT_QUOTE: char = '"';
pub(crate) const DEFAULT_ESCAPE: char = '\\';

// A scalar flag named without a value is read as this token.
pub(crate) const TRUE_TOKEN: &str = "true";
pub(crate) const FALSE_TOKEN: &str = "false";

pub(crate) const FALLBACK_TERMINAL_WIDTH: usize = 80;
// Wide enough to hyphenate a word and still leave room for the indent.
pub(crate) const MINIMUM_TERMINAL_WIDTH: usize = 20;
pub(crate) const DESCRIPTOR_INDENT: usize = 2;
