#[macro_use]
extern crate assert_matches;

use paramset::{
    Array, ErrorKind, HelpParameter, InteractiveError, Parameter, ParameterSet, Scalar, Tokenizer,
    MAX_PARSE_ATTEMPTS,
};
use std::io::Cursor;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeUnit {
    Seconds,
    Minutes,
}

#[test]
fn builder_compiles() {
    ParameterSet::builder().build();
}

#[test]
fn parse_tokenized_line() {
    // Setup
    let mut loops: i64 = 0;
    let mut regex = false;
    let mut name = String::default();
    let mut inputs: Vec<PathBuf> = Vec::default();
    let mut unit = TimeUnit::Seconds;
    let set = ParameterSet::builder()
        .add(Parameter::new(Scalar::new(&mut loops), "-loopCount").alias("-loops"))
        .add(Parameter::new(Scalar::new(&mut regex), "-regex"))
        .add(Parameter::new(Scalar::new(&mut name), "-name"))
        .add(Parameter::new(Array::new(&mut inputs), "-inputs"))
        .add(Parameter::enumeration(
            Scalar::new(&mut unit),
            "-unit",
            [("SECONDS", TimeUnit::Seconds), ("MINUTES", TimeUnit::Minutes)],
        ))
        .help(HelpParameter::new("-help"))
        .build();
    let tokens = Tokenizer::default()
        .tokenize("program -loops 3 -regex -name \"task A\" -inputs a.txt \"b c.txt\" -unit MINUTES");

    // Execute
    let completion = set.parse(&tokens, 1, &mut std::io::sink()).unwrap();

    // Verify
    assert_eq!(completion.is_complete("-help"), Some(false));
    assert_eq!(
        completion
            .iter()
            .filter(|(_, _, complete)| *complete)
            .count(),
        5
    );
    drop(set);
    assert_eq!(loops, 3);
    assert!(regex);
    assert_eq!(name, "task A");
    assert_eq!(inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b c.txt")]);
    assert_eq!(unit, TimeUnit::Minutes);
}

#[test]
fn parse_interactive_end_to_end() {
    // Setup
    let mut loops: i64 = 0;
    let mut names: Vec<String> = Vec::default();
    let set = ParameterSet::builder()
        .add(
            Parameter::new(Scalar::new(&mut loops), "-loops")
                .prompt("loops: ")
                .required()
                .validator(|value| *value > 0),
        )
        .add(
            Parameter::new(Array::new(&mut names), "-names")
                .prompt("names: ")
                .required(),
        )
        .build();
    let mut input = Cursor::new("0\r\n?\r\n2\r\nx \"y z\"\r\n");
    let mut output: Vec<u8> = Vec::default();
    let tokens: &[&str] = &[];

    // Execute
    set.parse_interactive(tokens, 0, &mut input, &mut output, "?")
        .unwrap();

    // Verify
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "loops: invalid integer value '0' for parameter '-loops'.\n\
         loops: '-loops integer' (required)\n\
         loops: names: "
    );
    drop(set);
    assert_eq!(loops, 2);
    assert_eq!(names, vec!["x", "y z"]);
}

#[test]
fn parse_interactive_rejected_tokens() {
    // Setup
    let mut loops: i64 = 0;
    let mut regex = false;
    let set = ParameterSet::builder()
        .add(
            Parameter::new(Scalar::new(&mut loops), "-loops")
                .required()
                .validator(|value| *value < 10),
        )
        .add(Parameter::new(Scalar::new(&mut regex), "-regex"))
        .build();
    let mut input = Cursor::new("5\n");

    // Execute
    let error = set
        .parse_interactive(&["-loops", "15", "-regex"], 0, &mut input, &mut std::io::sink(), "?")
        .unwrap_err();

    // Verify
    assert_eq!(error.kind(), Some(ErrorKind::InvalidParsedInput));
    assert_matches!(error, InteractiveError::Parameter(_));
    drop(set);
    assert_eq!(loops, 0);
    assert!(!regex);
}

#[test]
fn parse_interactive_exhausted() {
    // Setup
    let set = ParameterSet::builder()
        .add(
            Parameter::new(Scalar::with(|_: f64| {}), "-ratio")
                .required()
                .validator(|value| *value <= 1.0),
        )
        .build();
    let mut input = Cursor::new("2.0\n".repeat(MAX_PARSE_ATTEMPTS));
    let tokens: &[&str] = &[];

    // Execute
    let error = set
        .parse_interactive(tokens, 0, &mut input, &mut std::io::sink(), "?")
        .unwrap_err();

    // Verify
    assert_eq!(error.kind(), Some(ErrorKind::InvalidParsedInput));
    assert_matches!(error, InteractiveError::AttemptsExhausted { attempts, .. } if attempts == MAX_PARSE_ATTEMPTS);
}
