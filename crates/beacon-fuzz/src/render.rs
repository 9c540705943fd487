//! Renders a [`StateSet`] into Go source.
//!
//! The layout must stay byte-for-byte stable since the generated file is
//! checked in and compiled by the fuzz targets:
//!
//! ```text
//! // Code generated by //tools/beacon-fuzz:beacon-fuzz. DO NOT EDIT.
//! package testing
//!
//! // generateStates is a map of generated states from ssz.
//! var generatedStates = map[uint16]string{
//! 	0: "0102",1: "ff",
//! }
//! ```

use std::fmt::Write;

use crate::{state::StateSet, Error};

pub const GENERATOR: &str = "//tools/beacon-fuzz:beacon-fuzz";

/// `<id>: "<hex>",` for every state, in identifier order.
pub fn format_entries(states: &StateSet) -> Result<String, Error> {
    let mut entries = String::new();
    for (id, contents) in states.iter() {
        write!(entries, "{}: \"{}\",", id, hex::encode(contents))?;
    }
    Ok(entries)
}

pub fn render(package: &str, states: &StateSet) -> Result<String, Error> {
    let entries = format_entries(states)?;

    let mut out = String::new();
    writeln!(out, "// Code generated by {GENERATOR}. DO NOT EDIT.")?;
    writeln!(out, "package {package}")?;
    writeln!(out)?;
    writeln!(out, "// generateStates is a map of generated states from ssz.")?;
    writeln!(out, "var generatedStates = map[uint16]string{{")?;
    writeln!(out, "\t{entries}")?;
    writeln!(out, "}}")?;
    Ok(out)
}
