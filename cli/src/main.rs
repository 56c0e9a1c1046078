//! Demonstration binary: a mock build-tool front end whose argument handling
//! is the argtree engine itself. Parses its own argv against a grammar built
//! with the library and prints the resulting parse summary as JSON.

use std::process::ExitCode;

use argtree_core::validation::{FileValidator, NumberValidator};
use argtree_core::{Argument, Flag, Group, OptionNode, Parser, PropertyOption, Switch};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_grammar() -> Group {
    Group::new("argtree-demo")
        .with_option(
            Flag::new(Some("-h"), Some("--help")).with_description("print usage and exit"),
        )
        .with_option(
            Flag::new(Some("-v"), Some("--verbose"))
                .with_description("increase verbosity (repeatable)"),
        )
        .with_option(
            Flag::new(Some("-f"), Some("--file"))
                .with_description("build file to read")
                .with_argument(
                    Argument::new("path")
                        .with_minimum(1)
                        .with_maximum(1)
                        .with_initial_separator('=')
                        .with_validator(FileValidator::any_path()),
                ),
        )
        .with_option(
            Flag::new(Some("-j"), Some("--jobs"))
                .with_description("parallel job count")
                .with_argument(
                    Argument::new("count")
                        .with_minimum(1)
                        .with_maximum(1)
                        .with_defaults(["1"])
                        .with_validator(NumberValidator::integer().with_minimum(1.0)),
                ),
        )
        .with_option(
            Switch::new("color")
                .with_default(true)
                .with_description("colored output (+color / -color)"),
        )
        .with_option(PropertyOption::new().with_description("define a property (-Dkey=value)"))
        .with_option(
            Argument::new("targets")
                .with_defaults(["all"])
                .with_description("build targets"),
        )
}

fn print_usage(grammar: &Group) {
    eprintln!("usage: argtree-demo [options] [targets...]");
    eprintln!();
    for child in grammar.children() {
        let forms = match child {
            OptionNode::Argument(_) => format!("<{}>", child.preferred_name()),
            OptionNode::Property(_) => format!("{}key=value", child.preferred_name()),
            _ => child.triggers().join(", "),
        };
        let required = if child.is_required() { " (required)" } else { "" };
        match child.description() {
            Some(description) => eprintln!("  {forms:24} {description}{required}"),
            None => eprintln!("  {forms}{required}"),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let grammar = build_grammar();
    let parser = Parser::new(&grammar).with_help_trigger("--help");

    let mut failed = false;
    let Some(line) = parser.parse_or_report(std::env::args().skip(1), |error| {
        eprintln!("argtree-demo: {error}");
        failed = true;
    }) else {
        print_usage(&grammar);
        return if failed { ExitCode::from(2) } else { ExitCode::SUCCESS };
    };

    debug!(options = line.options().len(), "parse finished");

    let summary = line.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("argtree-demo: failed to render summary: {error}");
            ExitCode::FAILURE
        }
    }
}
