//! adaptc
//!
//! Generates adapter sources from request files.

use adapter_compiler::logging::{ConsoleLogger, LogLevel, Logger};
use adapter_compiler::GeneratorConfig;
use adapter_compiler_cli::config::{self, Overrides};
use adapter_compiler_cli::perform_generate::{
    exit_code_from_result, format_diagnostics, perform_generation, GenerateOptions, OutputFormat,
};
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use std::process;

fn cli() -> Command {
    Command::new("adaptc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates handle-based adapters for types with suspending and streaming members")
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .help("Request files or glob patterns")
                .required(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Generator configuration file"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .default_value("generated")
                .help("Directory receiving generated files"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["kotlin", "json"])
                .default_value("kotlin")
                .help("Output format"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_parser(["debug", "info", "warn", "error"])
                .help("Overrides the configured log level"),
        )
        .arg(
            Arg::new("default-context-provider")
                .long("default-context-provider")
                .value_name("MEMBER")
                .help("Qualified member passed by secondary constructors"),
        )
}

fn main() {
    let matches = cli().get_matches();

    let base = match matches.get_one::<String>("config") {
        Some(path) => match config::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {:#}", e);
                process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    let overrides = Overrides {
        log_level: matches
            .get_one::<String>("log-level")
            .and_then(|level| level.parse::<LogLevel>().ok()),
        default_context_provider: matches.get_one::<String>("default-context-provider").cloned(),
    };
    let config = overrides.apply(base);
    let logger = ConsoleLogger::new(config.log_level);

    let format = matches
        .get_one::<String>("format")
        .and_then(|format| format.parse::<OutputFormat>().ok())
        .unwrap_or_default();
    let out_dir = matches
        .get_one::<String>("out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("generated"));

    let options = GenerateOptions {
        inputs: matches
            .get_many::<String>("inputs")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        out_dir,
        format,
        config,
    };

    let result = perform_generation(&options, &logger);
    logger.info(&format!(
        "wrote {} file(s) to {}",
        result.written.len(),
        options.out_dir.display()
    ));

    if !result.diagnostics.is_empty() {
        eprint!("{}", format_diagnostics(&result.diagnostics));
    }
    process::exit(exit_code_from_result(&result.diagnostics));
}
