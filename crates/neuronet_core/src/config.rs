//! Configuration for network construction and training.
//!
//! Maps to a `neuronet.toml` file. Every section has defaults, so a file only
//! needs the values it overrides.
//!
//! ## Example `neuronet.toml`
//!
//! ```toml
//! [network]
//! inputs = 2
//! hidden = [4]
//! outputs = 1
//! bias_unit = true
//! activation = "tanh"
//!
//! [training]
//! learning_rate = 0.09
//! max_epochs = 10000
//! seed = 42
//! ```

use neuronet_data::{ActivationKind, TopologyPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of a fully connected feed-forward network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub inputs: usize,
    /// Width of each hidden layer, in order.
    pub hidden: Vec<usize>,
    pub outputs: usize,
    /// Adds a constant-bias unit feeding every hidden and output neuron.
    pub bias_unit: bool,
    pub activation: ActivationKind,
    /// Initial weights are uniform in `-weight_range..weight_range`.
    pub weight_range: f64,
    pub allow_output_projections: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            inputs: 2,
            hidden: vec![4],
            outputs: 1,
            bias_unit: true,
            activation: ActivationKind::Tanh,
            weight_range: 0.5,
            allow_output_projections: true,
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn policy(&self) -> TopologyPolicy {
        TopologyPolicy {
            allow_output_projections: self.allow_output_projections,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    /// Fixed seed for weight initialization; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Epochs between progress log lines.
    pub log_interval: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.09,
            max_epochs: 10_000,
            seed: None,
            log_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub training: TrainingConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Input and output layers must be non-empty; hidden layers may not be zero-width
    /// - Weight range must be finite and non-negative
    /// - Learning rate must be finite and positive
    /// - At least one training epoch
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.network.inputs > 0, "Network needs at least one input");
        anyhow::ensure!(self.network.outputs > 0, "Network needs at least one output");
        anyhow::ensure!(
            self.network.hidden.iter().all(|&w| w > 0),
            "Hidden layers must not be empty"
        );
        anyhow::ensure!(
            self.network.weight_range.is_finite() && self.network.weight_range >= 0.0,
            "Weight range must be finite and non-negative"
        );

        anyhow::ensure!(
            self.training.learning_rate.is_finite() && self.training.learning_rate > 0.0,
            "Learning rate must be positive"
        );
        anyhow::ensure!(self.training.max_epochs > 0, "Max epochs must be positive");
        anyhow::ensure!(self.training.log_interval > 0, "Log interval must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    /// Stable hash of the settings that influence the trained result.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.network).as_bytes());
        hasher.update(format!("{:?}", self.training.learning_rate).as_bytes());
        hasher.update(format!("{:?}", self.training.max_epochs).as_bytes());
        hasher.update(format!("{:?}", self.training.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_inputs_rejected() {
        let config = AppConfig {
            network: NetworkConfig {
                inputs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_hidden_layer_rejected() {
        let config = AppConfig {
            network: NetworkConfig {
                hidden: vec![4, 0],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_learning_rate_rejected() {
        let config = AppConfig {
            training: TrainingConfig {
                learning_rate: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [network]
            hidden = [8, 3]
            activation = "softsign"

            [training]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.network.hidden, vec![8, 3]);
        assert_eq!(config.network.activation, ActivationKind::Softsign);
        assert_eq!(config.network.inputs, 2);
        assert_eq!(config.training.seed, Some(7));
        assert_eq!(config.training.learning_rate, 0.09);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(AppConfig::from_toml("[training]\nlearning_rate = -1.0").is_err());
        assert!(AppConfig::from_toml("[network\n").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("/nonexistent/neuronet.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = AppConfig::default();
        let mut b = AppConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.training.seed = Some(1);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
