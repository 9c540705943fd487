//! Embeds beacon state snapshots into a generated Go source file.
//!
//! Fuzz targets only get their corpus on disk, so the canonical states they
//! start from are compiled in instead: every snapshot file, named by its
//! numeric identifier, becomes a hex string in a `map[uint16]string`.

mod config;
mod error;
mod generator;
mod render;
mod state;

pub use config::{GeneratorConfig, DEFAULT_PACKAGE, MAX_STATES};
pub use error::Error;
pub use generator::{check, generate};
pub use render::{format_entries, render, GENERATOR};
pub use state::{StateFile, StateId, StateSet};
