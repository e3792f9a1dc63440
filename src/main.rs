use clap::{Arg, ArgAction, Command};
use std::io::IsTerminal;
use std::path::Path;
use tracing::debug;

use hampool::lookup::{self, LookupOptions, QuestionPool};
use hampool::output;
use hampool::parsing::{self, ParseOptions};
use hampool::problem::{self, Severity};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("hampool")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Read amateur radio examination question pools.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging output; repeat for more detail."),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a question pool and write it out as JSON")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .help("Directory to write the element JSON file into. Nothing is written if not given."),
                )
                .arg(
                    Arg::new("min-severity")
                        .long("min-severity")
                        .value_name("LEVEL")
                        .default_value("info")
                        .value_parser(|value: &str| value.parse::<Severity>())
                        .help("Only show diagnostics at or above this level: debug, info, warning, or error."),
                )
                .arg(
                    Arg::new("no-color")
                        .long("no-color")
                        .action(ArgAction::SetTrue)
                        .help("Do not emit ANSI escape codes even if writing to a terminal."),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .action(ArgAction::SetTrue)
                        .help("Print a report of the counts found to standard output."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The text file containing the question pool."),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Retrieve questions by id from a previously written element JSON file")
                .arg(
                    Arg::new("strip-answer-prefix")
                        .long("strip-answer-prefix")
                        .action(ArgAction::SetTrue)
                        .help("Remove the \"A. \" style label from each answer."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The element JSON file."),
                )
                .arg(
                    Arg::new("qids")
                        .required(true)
                        .num_args(1..)
                        .help("Question identifiers, for example T1A01."),
                ),
        )
        .get_matches();

    setup_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("parse", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(Path::new)
                .unwrap_or_else(|| Path::new("-"));
            let minimum = submatches
                .get_one::<Severity>("min-severity")
                .copied()
                .unwrap_or(Severity::Info);
            let colour = !submatches.get_flag("no-color") && std::io::stderr().is_terminal();

            debug!(?filename, ?minimum);

            let content = match parsing::load(filename) {
                Ok(content) => content,
                Err(error) => {
                    eprintln!("{}", problem::concise_loading_error(&error));
                    std::process::exit(1);
                }
            };

            let options = ParseOptions {
                filename: filename
                    .display()
                    .to_string(),
                filetype: parsing::file_type(&content).to_string(),
                minimum,
                timestamp: None,
            };

            let lines = parsing::lines(&content);
            let parsed = parsing::parse(&lines, &options);

            for diagnostic in parsed
                .diagnostics
                .iter()
            {
                eprintln!("{}", problem::render_diagnostic(diagnostic, colour));
            }

            if let (Some(directory), Some(element)) = (
                submatches.get_one::<String>("output"),
                &parsed.element,
            ) {
                if let Err(error) = output::write_json(element, Path::new(directory)) {
                    eprintln!("error: Failed writing JSON to {}: {}", directory, error);
                    std::process::exit(1);
                }
            }

            if submatches.get_flag("summary") {
                if let Some(summary) = &parsed.summary {
                    match output::render_summary(summary) {
                        Ok(report) => print!("{}", report),
                        Err(error) => {
                            eprintln!("error: Failed rendering summary: {}", error);
                            std::process::exit(1);
                        }
                    }
                }
            }

            if parsed.errors() > 0 {
                std::process::exit(1);
            }
        }
        Some(("lookup", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .map(Path::new)
                .unwrap_or_else(|| Path::new("-"));
            let qids: Vec<&str> = submatches
                .get_many::<String>("qids")
                .map(|values| {
                    values
                        .map(String::as_str)
                        .collect()
                })
                .unwrap_or_default();
            let options = LookupOptions {
                strip_answer_prefix: submatches.get_flag("strip-answer-prefix"),
            };

            debug!(?filename, ?qids);

            let element = match lookup::read_element(filename) {
                Ok(element) => element,
                Err(error) => {
                    eprintln!("error: {}", error);
                    std::process::exit(1);
                }
            };

            let pool = QuestionPool::new(&element);
            let results = pool.questions_by_ids(&qids, &options);

            match serde_json::to_string_pretty(&results) {
                Ok(json) => println!("{}", json),
                Err(error) => {
                    eprintln!("error: {}", error);
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: hampool [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let mut filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // diagnostics are printed directly; only echo them to the log when asked
    if verbosity == 0 {
        if let Ok(directive) = "hampool::problem=off".parse() {
            filter = filter.add_directive(directive);
        }
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
