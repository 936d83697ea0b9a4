//! Application layer behind the `neuronet` binary.

use crate::model::{
    evaluate, feed_forward, summarize, xor_samples, AppConfig, Brain, GraphSummary, Layers,
    Trainer, TrainingReport,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub epochs: Option<usize>,
    pub learning_rate: Option<f64>,
}

/// Loads `path` (defaults when missing), applies overrides and validates.
pub fn load_config(path: impl AsRef<Path>, overrides: &Overrides) -> Result<AppConfig> {
    let mut config = AppConfig::load(path)?;
    if let Some(seed) = overrides.seed {
        config.training.seed = Some(seed);
    }
    if let Some(epochs) = overrides.epochs {
        config.training.max_epochs = epochs;
    }
    if let Some(rate) = overrides.learning_rate {
        config.training.learning_rate = rate;
    }
    config.validate()?;
    Ok(config)
}

/// Builds the configured network. A missing seed is drawn from entropy and logged.
pub fn build(config: &AppConfig) -> Result<(Brain, Layers)> {
    let seed = config.training.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, fingerprint = %config.fingerprint(), "Building network");
    let built = feed_forward(&config.network, seed).context("building network")?;
    Ok(built)
}

/// Outcome of a training run.
#[derive(Debug)]
pub struct TrainOutcome {
    pub brain: Brain,
    pub report: TrainingReport,
    /// Output for each XOR row after training, in sample order.
    pub outputs: Vec<(Vec<f64>, Vec<f64>)>,
}

/// Trains a fresh network on XOR, optionally saving its parameters.
pub fn train(config: &AppConfig, save: Option<&Path>) -> Result<TrainOutcome> {
    anyhow::ensure!(
        config.network.inputs == 2 && config.network.outputs == 1,
        "XOR training needs 2 inputs and 1 output, config has {} and {}",
        config.network.inputs,
        config.network.outputs
    );

    let (mut brain, _) = build(config)?;
    let samples = xor_samples();
    let trainer = Trainer::new(config.training.clone());
    let report = trainer.train(&mut brain, &samples)?;

    tracing::info!(
        epochs = report.epochs,
        error = report.final_error,
        converged = report.converged,
        "Training finished"
    );
    if !report.converged {
        tracing::warn!(max_epochs = config.training.max_epochs, "Did not converge");
    }

    let mut outputs = Vec::with_capacity(samples.len());
    for sample in &samples {
        outputs.push((sample.input.clone(), brain.evaluate(&sample.input)?));
    }

    if let Some(path) = save {
        neuronet_io::save_parameters(&brain, path)
            .with_context(|| format!("saving parameters to {}", path.display()))?;
    }

    Ok(TrainOutcome {
        brain,
        report,
        outputs,
    })
}

/// Result of inspecting a network.
#[derive(Debug)]
pub struct Inspection {
    pub summary: GraphSummary,
    pub levels: Vec<usize>,
    /// Mean squared XOR error, when the shape allows evaluating it.
    pub xor_error: Option<f64>,
}

/// Builds the configured network, optionally loads parameters, and describes it.
pub fn inspect(config: &AppConfig, params: Option<&Path>) -> Result<Inspection> {
    let (mut brain, _) = build(config)?;
    if let Some(path) = params {
        neuronet_io::load_parameters(&mut brain, path)
            .with_context(|| format!("loading parameters from {}", path.display()))?;
    }

    let levels = brain.layers()?.iter().map(Vec::len).collect();
    let xor_error = if config.network.inputs == 2 && config.network.outputs == 1 {
        Some(evaluate(&mut brain, &xor_samples())?)
    } else {
        None
    };

    Ok(Inspection {
        summary: summarize(&brain),
        levels,
        xor_error,
    })
}
