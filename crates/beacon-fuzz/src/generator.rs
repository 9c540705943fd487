use std::{fs, io};

use tracing::{debug, info, warn};

use crate::{config::GeneratorConfig, render::render, state::StateSet, Error};

fn render_config(config: &GeneratorConfig) -> Result<(StateSet, String), Error> {
    if config.state_paths.is_empty() {
        warn!("no state paths given, generating an empty map");
    }
    let states = StateSet::load(&config.state_paths)?;
    let source = render(&config.package, &states)?;
    Ok((states, source))
}

/// Reads every state, renders the Go source and overwrites the output file.
///
/// Nothing is written unless every state was read successfully.
pub fn generate(config: &GeneratorConfig) -> Result<(), Error> {
    let (states, rendered) = render_config(config)?;

    fs::write(&config.output_path, &rendered).map_err(|source| Error::WriteOutput {
        path: config.output_path.clone(),
        source,
    })?;
    info!(
        path = %config.output_path,
        states = states.len(),
        bytes = rendered.len(),
        "wrote generated states"
    );
    Ok(())
}

/// Fails with [`Error::OutOfDate`] if the output file does not match what
/// [`generate`] would write.
pub fn check(config: &GeneratorConfig) -> Result<(), Error> {
    let (_, rendered) = render_config(config)?;

    let existing = match fs::read_to_string(&config.output_path) {
        Ok(existing) => existing,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::OutOfDate(config.output_path.clone()));
        }
        Err(source) => {
            return Err(Error::ReadOutput {
                path: config.output_path.clone(),
                source,
            })
        }
    };

    if existing != rendered {
        return Err(Error::OutOfDate(config.output_path.clone()));
    }
    debug!("{} is up to date", config.output_path);
    Ok(())
}
