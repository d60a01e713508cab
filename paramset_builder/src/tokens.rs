use crate::constant::{DEFAULT_ESCAPE, DEFAULT_QUOTE};

/// Splits a raw line of text into argument tokens.
///
/// Tokens are separated by runs of whitespace, except where the whitespace falls inside a quoted section.
/// Each token has one layer of surrounding quotes removed.
/// When escapes are enabled, a quote preceded by the escape character is literal text, and the escape is removed.
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::Tokenizer;
///
/// let tokens = Tokenizer::default().tokenize(r#"-name "task A" -loops 3"#);
/// assert_eq!(tokens, vec!["-name", "task A", "-loops", "3"]);
///
/// let tokens = Tokenizer::interactive().tokenize(r#""a=\"A\"""#);
/// assert_eq!(tokens, vec![r#"a="A""#]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    quote: char,
    escape: char,
    escapes: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            quote: DEFAULT_QUOTE,
            escape: DEFAULT_ESCAPE,
            escapes: false,
        }
    }
}

impl Tokenizer {
    /// Create a tokenizer quoting with `quote`, with escapes disabled.
    pub fn new(quote: char) -> Self {
        Self {
            quote,
            ..Self::default()
        }
    }

    /// The tokenizer used for interactively entered array values: `"` quotes, with `\` escapes enabled.
    pub fn interactive() -> Self {
        Self::default().escape(DEFAULT_ESCAPE)
    }

    /// Enable escapes, using `escape` as the escape character.
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self.escapes = true;
        self
    }

    /// Split `raw` into tokens.
    ///
    /// Leading and trailing whitespace is ignored.
    /// An input without any token boundary produces a single token (an empty input produces `[""]`).
    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let mut tokens = Vec::default();
        let mut current = String::default();
        let mut in_quote = false;
        let mut in_whitespace = false;
        let mut previous: Option<char> = None;

        for c in raw.trim().chars() {
            if !in_quote && c.is_whitespace() {
                if !in_whitespace {
                    tokens.push(self.finish(&current));
                    current.clear();
                    in_whitespace = true;
                }
            } else {
                in_whitespace = false;

                if c == self.quote && !self.is_escape(previous) {
                    in_quote = !in_quote;
                }

                current.push(c);
            }

            previous = Some(c);
        }

        tokens.push(self.finish(&current));
        tokens
    }

    fn is_escape(&self, c: Option<char>) -> bool {
        self.escapes && c == Some(self.escape)
    }

    fn finish(&self, token: &str) -> String {
        let inner = self.strip_quotes(token);

        if self.escapes {
            let escaped = format!("{}{}", self.escape, self.quote);
            inner.replace(&escaped, &self.quote.to_string())
        } else {
            inner.to_string()
        }
    }

    fn strip_quotes<'t>(&self, token: &'t str) -> &'t str {
        let mut chars = token.chars();
        let first = chars.next();
        let last = chars.next_back();
        let before_last = chars.next_back();

        match (first, last) {
            (Some(first), Some(last))
                if first == self.quote && last == self.quote && !self.is_escape(before_last) =>
            {
                let width = self.quote.len_utf8();
                &token[width..token.len() - width]
            }
            _ => token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case("1 w 3 \"arg 4\" \"or \\' quote\"", vec!["1", "w", "3", "arg 4", "or \\' quote"])]
    #[case("\"a b\" c\"", vec!["a b", "c\""])]
    #[case("\"vla\", \"wa\"", vec!["\"vla\",", "wa"])]
    #[case(" abc\"de\"", vec!["abc\"de\""])]
    #[case("\"alpha beta\"", vec!["alpha beta"])]
    #[case("\"\"", vec![""])]
    #[case("", vec![""])]
    #[case("   ", vec![""])]
    #[case("\"", vec!["\""])]
    #[case("a \t\n b", vec!["a", "b"])]
    #[case("\"\"\"\"", vec!["\"\""])]
    #[case("-name \"task A\" -loops 3", vec!["-name", "task A", "-loops", "3"])]
    fn tokenize_default(#[case] raw: &str, #[case] expected: Vec<&str>) {
        // Setup
        let tokenizer = Tokenizer::default();

        // Execute
        let tokens = tokenizer.tokenize(raw);

        // Verify
        assert_eq!(tokens, expected);
    }

    #[rstest]
    #[case("\"a=\\\"A\\\"\"", vec!["a=\"A\""])]
    #[case("a\\\"b c", vec!["a\"b", "c"])]
    #[case("\\\"a b\\\"", vec!["\"a", "b\""])]
    #[case("\"a b\\\"", vec!["\"a b\""])]
    #[case("x \"y z\"", vec!["x", "y z"])]
    fn tokenize_escapes(#[case] raw: &str, #[case] expected: Vec<&str>) {
        // Setup
        let tokenizer = Tokenizer::interactive();

        // Execute
        let tokens = tokenizer.tokenize(raw);

        // Verify
        assert_eq!(tokens, expected);
    }

    #[test]
    fn tokenize_escapes_disabled() {
        // Setup
        let tokenizer = Tokenizer::default();

        // Execute
        let tokens = tokenizer.tokenize("\"a=\\\"A\\\"\"");

        // Verify
        // The second quote closes the section, so the whole input is one token with its outer quotes removed.
        assert_eq!(tokens, vec!["a=\\\"A\\\""]);
    }

    #[test]
    fn tokenize_custom_quote() {
        // Setup
        let tokenizer = Tokenizer::new('\'').escape('^');

        // Execute
        let tokens = tokenizer.tokenize("'a b' 'c^'d'");

        // Verify
        assert_eq!(tokens, vec!["a b", "c'd"]);
    }

    #[test]
    fn tokenize_quote_free_matches_split_whitespace() {
        let whitespace = [" ", "  ", "\t", " \t ", "\n", "\r\n"];
        let alphabet: Vec<char> = "abcxyz0123-_./=".chars().collect();
        let tokenizer = Tokenizer::default();

        for _ in 0..100 {
            // Setup
            let mut raw = String::default();
            if thread_rng().gen() {
                raw.push_str(whitespace[thread_rng().gen_range(0..whitespace.len())]);
            }

            let words = thread_rng().gen_range(1..8);
            for i in 0..words {
                if i > 0 {
                    raw.push_str(whitespace[thread_rng().gen_range(0..whitespace.len())]);
                }

                for _ in 0..thread_rng().gen_range(1..6) {
                    raw.push(alphabet[thread_rng().gen_range(0..alphabet.len())]);
                }
            }

            if thread_rng().gen() {
                raw.push_str(whitespace[thread_rng().gen_range(0..whitespace.len())]);
            }

            // Execute
            let tokens = tokenizer.tokenize(&raw);

            // Verify
            let expected: Vec<&str> = raw.split_whitespace().collect();
            assert_eq!(tokens, expected, "raw: {raw:?}");
        }
    }
}
