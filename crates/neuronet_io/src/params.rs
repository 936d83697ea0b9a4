//! Saving and restoring a brain's learnable parameters.

use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, write_json_file};
use neuronet_core::Brain;
use neuronet_data::ParameterSnapshot;
use std::path::Path;

/// Writes every bias and synapse weight of `brain` to `path` as pretty JSON.
pub fn save_parameters<P: AsRef<Path>>(brain: &Brain, path: P) -> Result<()> {
    let snapshot = brain.parameters();
    write_json_file(&snapshot, &path)?;
    tracing::info!(
        path = %path.as_ref().display(),
        neurons = snapshot.neurons.len(),
        synapses = snapshot.synapses.len(),
        "Saved parameters"
    );
    Ok(())
}

/// Reads a snapshot from `path` and loads it into a brain of the same shape.
///
/// Nothing is written to `brain` unless the whole snapshot matches.
pub fn load_parameters<P: AsRef<Path>>(brain: &mut Brain, path: P) -> Result<()> {
    let snapshot: ParameterSnapshot = read_json_file(&path)?;
    if snapshot.is_empty() {
        return Err(IoError::validation("parameter file holds no neurons")
            .with_context(format!("loading {:?}", path.as_ref())));
    }
    brain.load_parameters(&snapshot)?;
    tracing::info!(path = %path.as_ref().display(), "Loaded parameters");
    Ok(())
}
