use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};

use crate::Error;

/// Only this many state files are embedded; the rest are dropped.
pub const MAX_STATES: usize = 15;

pub const DEFAULT_PACKAGE: &str = "testing";

/// Everything a single generator run needs.
///
/// Built once from the command line and handed to
/// [`generate`](crate::generate) or [`check`](crate::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub output_path: Utf8PathBuf,
    pub state_paths: Vec<PathBuf>,
    pub package: String,
}

impl GeneratorConfig {
    /// Validates the output path without touching the file system.
    ///
    /// A missing or empty output is rejected here so that no state file is
    /// read for a run that could never be written.
    pub fn new(
        output_path: Option<Utf8PathBuf>,
        state_paths: Vec<PathBuf>,
    ) -> Result<Self, Error> {
        let output_path = match output_path {
            Some(path) if !path.as_str().is_empty() => expand_home(path)?,
            _ => return Err(Error::MissingOutput),
        };

        Ok(Self {
            output_path,
            state_paths,
            package: DEFAULT_PACKAGE.to_string(),
        })
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Result<Self, Error> {
        let package = package.into();
        if !is_go_package_name(&package) {
            return Err(Error::InvalidPackage(package));
        }
        self.package = package;
        Ok(self)
    }
}

fn expand_home(path: Utf8PathBuf) -> Result<Utf8PathBuf, Error> {
    let rest = match path.as_str() {
        "~" => "",
        p => match p.strip_prefix("~/") {
            Some(rest) => rest,
            None => return Ok(path),
        },
    };

    let home = dirs_next::home_dir()
        .and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
        .ok_or_else(|| Error::HomeDir(path.clone()))?;

    Ok(if rest.is_empty() {
        home
    } else {
        home.join(Utf8Path::new(rest))
    })
}

const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// A name usable in a `package` clause: an identifier that is neither a
/// keyword nor the blank identifier.
fn is_go_package_name(name: &str) -> bool {
    if name == "_" || GO_KEYWORDS.contains(&name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
