use std::{path::PathBuf, process::ExitCode};

use beacon_fuzz::{check, generate, Error, GeneratorConfig, DEFAULT_PACKAGE};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Generate a Go map of state identifiers to hex encoded SSZ state files
#[derive(Parser, Debug)]
#[command(name = "beacon-fuzz")]
struct Args {
    /// Output filepath for generated states file.
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// Go package of the generated file
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,

    /// Verify the output file is up to date instead of writing it
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// State files, each named by its numeric identifier. Only the first 15
    /// are used.
    states: Vec<PathBuf>,
}

fn init_tracing(verbosity: u8) {
    let level_override = match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("BEACON_FUZZ_LOG")
        .from_env_lossy();

    let filter = if let Some(max_level) = level_override {
        filter.add_directive(max_level.into())
    } else {
        filter
    };

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_filter(filter);

    Registry::default().with(stderr).init();
}

fn run(args: Args) -> Result<(), Error> {
    let config = GeneratorConfig::new(args.output, args.states)?.with_package(args.package)?;

    if args.check {
        check(&config)
    } else {
        generate(&config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    // a hook can only be installed once; keep whichever is already there
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().wrap_lines(false).build())
    }));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::FAILURE
        }
    }
}
