//! Online training driver.
//!
//! One step per sample: set input, propagate, set desired, backpropagate.

use crate::brain::Brain;
use crate::config::TrainingConfig;
use crate::error::Result;
use crate::metrics::TrainingMetrics;
use serde::{Deserialize, Serialize};

/// One training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub desired: Vec<f64>,
}

impl Sample {
    #[must_use]
    pub fn new(input: impl Into<Vec<f64>>, desired: impl Into<Vec<f64>>) -> Self {
        Self {
            input: input.into(),
            desired: desired.into(),
        }
    }
}

/// The four XOR rows in the bipolar encoding.
#[must_use]
pub fn xor_samples() -> Vec<Sample> {
    vec![
        Sample::new([1.0, 1.0], [-1.0]),
        Sample::new([-1.0, -1.0], [-1.0]),
        Sample::new([1.0, -1.0], [1.0]),
        Sample::new([-1.0, 1.0], [1.0]),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub epochs: usize,
    pub final_error: f64,
    /// Every sample produced outputs with the desired signs.
    pub converged: bool,
}

pub struct Trainer {
    config: TrainingConfig,
    metrics: TrainingMetrics,
}

impl Trainer {
    #[must_use]
    pub fn new(config: TrainingConfig) -> Self {
        let metrics = TrainingMetrics::new(config.log_interval);
        Self { config, metrics }
    }

    #[must_use]
    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    /// Trains on one sample and returns its squared error before the update.
    pub fn train_sample(&self, brain: &mut Brain, sample: &Sample) -> Result<f64> {
        let output = brain.evaluate(&sample.input)?;
        brain.set_desired(&sample.desired)?;
        brain.backpropagate()?;
        self.metrics.record_sample();
        Ok(squared_error(&output, &sample.desired))
    }

    /// One pass over `samples`; returns the mean squared error.
    pub fn train_epoch(&self, brain: &mut Brain, samples: &[Sample]) -> Result<f64> {
        let mut total = 0.0;
        for sample in samples {
            total += self.train_sample(brain, sample)?;
        }
        let error = mean(total, samples.len());
        self.metrics.record_epoch(error);
        Ok(error)
    }

    /// Trains until every sample has the right output signs or `max_epochs` is reached.
    pub fn train(&self, brain: &mut Brain, samples: &[Sample]) -> Result<TrainingReport> {
        brain.set_learning_rate(self.config.learning_rate);

        let mut report = TrainingReport {
            epochs: 0,
            final_error: evaluate(brain, samples)?,
            converged: false,
        };
        while report.epochs < self.config.max_epochs {
            self.train_epoch(brain, samples)?;
            report.epochs += 1;
            if signs_match(brain, samples)? {
                report.converged = true;
                break;
            }
        }
        report.final_error = evaluate(brain, samples)?;

        if report.converged {
            tracing::info!(
                epochs = report.epochs,
                error = report.final_error,
                "Training converged"
            );
        } else {
            tracing::warn!(
                epochs = report.epochs,
                error = report.final_error,
                "Training stopped without converging"
            );
        }
        Ok(report)
    }
}

/// Mean squared error over `samples` without learning.
pub fn evaluate(brain: &mut Brain, samples: &[Sample]) -> Result<f64> {
    let mut total = 0.0;
    for sample in samples {
        let output = brain.evaluate(&sample.input)?;
        total += squared_error(&output, &sample.desired);
    }
    Ok(mean(total, samples.len()))
}

/// True when every output has the sign of its desired value.
pub fn signs_match(brain: &mut Brain, samples: &[Sample]) -> Result<bool> {
    for sample in samples {
        let output = brain.evaluate(&sample.input)?;
        let agree = output
            .iter()
            .zip(&sample.desired)
            .all(|(o, d)| o.signum() == d.signum());
        if !agree {
            return Ok(false);
        }
    }
    Ok(true)
}

fn squared_error(output: &[f64], desired: &[f64]) -> f64 {
    output
        .iter()
        .zip(desired)
        .map(|(o, d)| (d - o) * (d - o))
        .sum()
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::feed_forward;
    use crate::config::NetworkConfig;

    #[test]
    fn test_xor_rows() {
        let rows = xor_samples();
        assert_eq!(rows.len(), 4);
        for row in &rows {
            let expected = if row.input[0] == row.input[1] { -1.0 } else { 1.0 };
            assert_eq!(row.desired, vec![expected]);
        }
    }

    #[test]
    fn test_epoch_reduces_error_on_single_sample() {
        let (mut brain, _) = feed_forward(&NetworkConfig::default(), 3).unwrap();
        let trainer = Trainer::new(TrainingConfig::default());
        let samples = vec![Sample::new([0.5, -0.5], [0.6])];

        let before = evaluate(&mut brain, &samples).unwrap();
        for _ in 0..50 {
            trainer.train_epoch(&mut brain, &samples).unwrap();
        }
        let after = evaluate(&mut brain, &samples).unwrap();

        assert!(after < before, "error {} should drop below {}", after, before);
        assert_eq!(trainer.metrics().epochs(), 50);
        assert_eq!(trainer.metrics().samples(), 50);
    }

    #[test]
    fn test_train_rejects_mismatched_sample() {
        let (mut brain, _) = feed_forward(&NetworkConfig::default(), 3).unwrap();
        let trainer = Trainer::new(TrainingConfig::default());
        let samples = vec![Sample::new([1.0], [1.0])];
        assert!(trainer.train(&mut brain, &samples).is_err());
    }

    #[test]
    fn test_squared_error() {
        assert_eq!(squared_error(&[0.5, -1.0], &[1.0, 1.0]), 0.25 + 4.0);
        assert_eq!(mean(3.0, 0), 0.0);
    }
}
