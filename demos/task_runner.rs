use paramset::{HelpParameter, InteractiveError, Parameter, ParameterSet, Scalar};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
enum TimeUnit {
    Seconds,
    Minutes,
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "SECONDS"),
            TimeUnit::Minutes => write!(f, "MINUTES"),
        }
    }
}

fn main() -> Result<(), InteractiveError> {
    let mut loops: i64 = 1;
    let mut regex: bool = false;
    let mut name: String = String::default();
    let mut unit: TimeUnit = TimeUnit::Seconds;

    let set = ParameterSet::builder()
        .add(
            Parameter::new(Scalar::new(&mut loops), "-loopCount")
                .alias("-loops")
                .help("how many times to run the task")
                .prompt("loop count: ")
                .required()
                .validator(|value| (1..=10).contains(value))
                .validator_message(|value| format!("{value} is not between 1 and 10")),
        )
        .add(
            Parameter::new(Scalar::new(&mut regex), "-regex")
                .help("match the task name as a regular expression"),
        )
        .add(
            Parameter::new(Scalar::new(&mut name), "-name")
                .help("the task to run")
                .prompt("task name: ")
                .required(),
        )
        .add(
            Parameter::variants(
                Scalar::new(&mut unit),
                "-unit",
                [TimeUnit::Seconds, TimeUnit::Minutes],
            )
            .help("the unit of the reported run time"),
        )
        .help(HelpParameter::new("-help").alias("-h"))
        .build();

    let tokens: Vec<String> = std::env::args().collect();
    set.parse_interactive_console(&tokens, 1, "help")?;
    drop(set);

    println!("Running '{name}' {loops} time(s) (regex: {regex}, unit: {unit}).");
    Ok(())
}
