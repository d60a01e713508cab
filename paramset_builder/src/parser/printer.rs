use terminal_size::{terminal_size, Width};

use crate::api::{HelpParameter, ParameterDefinition};
use crate::constant::*;
use crate::model::{Arity, ParameterKind};

/// Describe a parameter on one line: its usage, aliases, choices, whether it is required, and its help message.
///
/// For example: `'-loopCount integer', '-loops' (required) - how many times to run the task`.
pub(crate) fn describe(definition: &ParameterDefinition) -> String {
    let type_name = match definition.kind() {
        ParameterKind::Flag if definition.arity() == Arity::Scalar => "[false]".to_string(),
        kind => kind.to_string(),
    };
    let usage = match definition.arity() {
        Arity::Scalar => format!("{} {type_name}", definition.name()),
        Arity::Array => format!("{} {type_name} [{type_name} ...]", definition.name()),
    };
    let mut out = format!("'{usage}'");

    for alias in definition.aliases() {
        out.push_str(&format!(", '{alias}'"));
    }

    if let Some(choices) = definition.choices() {
        out.push_str(&format!(" (one of: [{}])", choices.join(", ")));
    }

    if definition.is_required() {
        out.push_str(" (required)");
    }

    if let Some(help) = definition.help() {
        out.push_str(&format!(" - {help}"));
    }

    out
}

pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    /// Render the help message: the help parameter itself, then one description per parameter, then a blank line.
    pub(crate) fn render_help(
        &self,
        help: &HelpParameter,
        definitions: &[ParameterDefinition],
    ) -> String {
        let total_width = std::cmp::max(
            self.terminal_width.unwrap_or(FALLBACK_TERMINAL_WIDTH),
            MINIMUM_TERMINAL_WIDTH,
        );
        let mut out = String::default();

        let help_names = std::iter::once(help.name())
            .chain(help.aliases().iter().map(String::as_str))
            .map(|name| format!("'{name}'"))
            .collect::<Vec<String>>()
            .join(", ");
        let header = format!("{help_names} - displays this help message");
        wrap_into(&mut out, &header, total_width);

        for definition in definitions {
            wrap_into(&mut out, &describe(definition), total_width);
        }

        out.push('\n');
        out
    }
}

// The first line of a paragraph is indented once, its continuation lines twice.
fn wrap_into(out: &mut String, paragraph: &str, total_width: usize) {
    let width = total_width - DESCRIPTOR_INDENT * 2;

    for (i, line) in chunk(paragraph, width).iter().enumerate() {
        let indent = if i == 0 {
            DESCRIPTOR_INDENT
        } else {
            DESCRIPTOR_INDENT * 2
        };
        out.push_str(&" ".repeat(indent));
        out.push_str(line);
        out.push('\n');
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();
    let mut current_width = 0;

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        let word_width = word.chars().count();

        if current_width > 0 && current_width + word_width + 1 <= width {
            current.push(' ');
            current.push_str(word);
            current_width += word_width + 1;
        } else {
            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
            }

            current_width = hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Breaks a word wider than `width` over as many lines as necessary, leaving the remainder in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) -> usize {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
    characters.len() - left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Array, Parameter, Scalar};
    use rstest::rstest;
    use std::path::PathBuf;

    fn definitions<'a>() -> Vec<ParameterDefinition<'a>> {
        vec![
            Parameter::new(Scalar::with(|_: i64| {}), "-loopCount")
                .alias("-loops")
                .required()
                .help("how many times to run the task")
                .build(),
            Parameter::new(Scalar::with(|_: bool| {}), "-regex").build(),
        ]
    }

    #[test]
    fn describe_scalar() {
        let definition = Parameter::new(Scalar::with(|_: i64| {}), "-loopCount")
            .alias("-loops")
            .alias("-loop-count")
            .required()
            .help("how many times to run the task")
            .build();

        assert_eq!(
            describe(&definition),
            "'-loopCount integer', '-loops', '-loop-count' (required) - how many times to run the task"
        );
    }

    #[test]
    fn describe_flag() {
        let definition = Parameter::new(Scalar::with(|_: bool| {}), "-regex")
            .help("match the name as a regular expression")
            .build();

        assert_eq!(
            describe(&definition),
            "'-regex [false]' - match the name as a regular expression"
        );
    }

    #[test]
    fn describe_array() {
        let definition = Parameter::new(Array::with(|_: Vec<PathBuf>| {}), "-inputs").build();
        assert_eq!(describe(&definition), "'-inputs path [path ...]'");

        let definition = Parameter::new(Array::with(|_: Vec<bool>| {}), "-bits").build();
        assert_eq!(describe(&definition), "'-bits flag [flag ...]'");
    }

    #[test]
    fn describe_enumeration() {
        let definition = Parameter::enumeration(
            Scalar::with(|_: u8| {}),
            "-level",
            [("LOW", 1), ("HIGH", 9)],
        )
        .help("the level")
        .build();

        assert_eq!(
            describe(&definition),
            "'-level enum' (one of: [LOW, HIGH]) - the level"
        );
    }

    #[test]
    fn render_help() {
        // Setup
        let printer = Printer::new(Some(40));
        let help = HelpParameter::new("-help").alias("-h");

        // Execute
        let message = printer.render_help(&help, &definitions());

        // Verify
        assert_eq!(
            message,
            r#"  '-help', '-h' - displays this help
    message
  '-loopCount integer', '-loops'
    (required) - how many times to run
    the task
  '-regex [false]'

"#
        );
    }

    #[test]
    fn render_help_fallback_width() {
        // Setup
        let printer = Printer::new(None);
        let help = HelpParameter::new("-help");

        // Execute
        let message = printer.render_help(&help, &definitions());

        // Verify
        assert_eq!(
            message,
            r#"  '-help' - displays this help message
  '-loopCount integer', '-loops' (required) - how many times to run the task
  '-regex [false]'

"#
        );
    }

    #[test]
    fn render_help_empty() {
        let printer = Printer::new(Some(1));
        let message = printer.render_help(&HelpParameter::new("-help"), &[]);
        assert_eq!(
            message,
            "  '-help' -\n    displays this\n    help message\n\n"
        );
    }

    #[rstest]
    #[case("", 5, vec![])]
    #[case("a b c", 5, vec!["a b c"])]
    #[case("a  b   c", 3, vec!["a b", "c"])]
    #[case("abcdefgh", 5, vec!["abcd-", "efgh"])]
    #[case("abcdefghi", 5, vec!["abcd-", "efghi"])]
    #[case("x abcdefghij y", 4, vec!["x", "abc-", "def-", "ghij", "y"])]
    #[case("ééééé é", 3, vec!["éé-", "ééé", "é"])]
    fn chunk_cases(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }
}
