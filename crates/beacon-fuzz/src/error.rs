use std::{io, path::PathBuf};

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Missing output")]
    #[diagnostic(
        code(beacon_fuzz::missing_output),
        help("Usage: beacon-fuzz --output=out.go path/to/state/0 path/to/state/1 ...")
    )]
    MissingOutput,
    #[error("Could not find home directory to expand '{0}'")]
    HomeDir(Utf8PathBuf),
    #[error("'{0}' is not a valid Go package name")]
    InvalidPackage(String),
    #[error("{} does not end in an integer for the filename.", .path.display())]
    #[diagnostic(
        code(beacon_fuzz::invalid_state_name),
        help("State files must be named by their identifier, between 0 and 65535.")
    )]
    InvalidStateName { path: PathBuf },
    #[error("Unable to read state file {}: {source}", .path.display())]
    ReadState {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to render generated states: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("Unable to write output to {path}: {source}")]
    WriteOutput {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to read existing output {path}: {source}")]
    ReadOutput {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is out of date")]
    #[diagnostic(
        code(beacon_fuzz::out_of_date),
        help("Run beacon-fuzz without --check to regenerate it.")
    )]
    OutOfDate(Utf8PathBuf),
}
