use super::{Brain, BIAS_UNIT_OUTPUT};
use crate::activation::shared;
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::group::NeuronGroup;
use neuronet_data::{NeuronId, Role};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Named layers of a feed-forward brain.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    pub input: NeuronGroup,
    pub hidden: Vec<NeuronGroup>,
    pub output: NeuronGroup,
    /// Constant-bias unit, when configured.
    pub bias: Option<NeuronId>,
}

impl Layers {
    /// All layers nested in one group, input first.
    #[must_use]
    pub fn network(&self) -> NeuronGroup {
        let mut network = NeuronGroup::new("network");
        network.add(self.input.clone());
        for layer in &self.hidden {
            network.add(layer.clone());
        }
        network.add(self.output.clone());
        if let Some(bias) = self.bias {
            network.add(NeuronGroup::with_neurons("bias", [bias]));
        }
        network
    }
}

pub fn feed_forward(config: &NetworkConfig, seed: u64) -> Result<(Brain, Layers)> {
    feed_forward_with_rng(config, ChaCha8Rng::seed_from_u64(seed))
}

/// Builds a fully connected feed-forward brain.
///
/// Consecutive layers are wired with [`NeuronGroup::connect_all_to`]. The
/// bias unit always outputs [`BIAS_UNIT_OUTPUT`] and feeds every hidden and
/// output neuron; only its outgoing weights learn.
pub fn feed_forward_with_rng(config: &NetworkConfig, rng: ChaCha8Rng) -> Result<(Brain, Layers)> {
    let activation = shared(config.activation);
    let mut brain = Brain::with_rng(rng)
        .with_policy(config.policy())
        .with_weight_range(config.weight_range);

    let input = brain.add_layer("input", Role::Input, config.inputs);
    let hidden: Vec<NeuronGroup> = config
        .hidden
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            brain.add_layer_with(format!("hidden{i}"), Role::Hidden, width, activation.clone())
        })
        .collect();
    let output = brain.add_layer_with("output", Role::Output, config.outputs, activation.clone());
    let bias = config
        .bias_unit
        .then(|| brain.add_bias_unit(BIAS_UNIT_OUTPUT));

    let mut previous = &input;
    for layer in hidden.iter().chain(std::iter::once(&output)) {
        previous.connect_all_to(layer, &mut brain)?;
        if let Some(bias) = bias {
            NeuronGroup::with_neurons("bias", [bias]).connect_all_to(layer, &mut brain)?;
        }
        previous = layer;
    }

    tracing::info!(
        inputs = config.inputs,
        hidden = ?config.hidden,
        outputs = config.outputs,
        bias_unit = config.bias_unit,
        synapses = brain.synapse_count(),
        "Built feed-forward brain"
    );

    Ok((
        brain,
        Layers {
            input,
            hidden,
            output,
            bias,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_shape() {
        let (mut brain, layers) = feed_forward(&NetworkConfig::default(), 42).unwrap();

        assert_eq!(layers.input.len(), 2);
        assert_eq!(layers.hidden[0].len(), 4);
        assert_eq!(layers.output.len(), 1);
        // 2*4 + 4*1 plus the bias unit feeding 4 hidden and 1 output
        assert_eq!(brain.synapse_count(), 8 + 4 + 5);
        assert_eq!(brain.neuron_count(), 8);
        assert_eq!(layers.network().len(), 8);
        brain.verify().unwrap();

        let levels = brain.layers().unwrap();
        assert_eq!(levels.len(), 3);
        assert!(levels[0].contains(&layers.bias.unwrap()));
    }

    #[test]
    fn test_bias_unit_stays_constant_through_training() {
        let (mut brain, layers) = feed_forward(&NetworkConfig::default(), 8).unwrap();
        let bias = layers.bias.unwrap();
        let before: Vec<f64> = brain
            .neuron(bias)
            .unwrap()
            .outgoing()
            .iter()
            .map(|&sid| brain.weight(sid).unwrap())
            .collect();

        for sample in crate::trainer::xor_samples().iter().cycle().take(40) {
            brain.evaluate(&sample.input).unwrap();
            assert_eq!(brain.neuron(bias).unwrap().output(), BIAS_UNIT_OUTPUT);
            brain.set_desired(&sample.desired).unwrap();
            brain.backpropagate().unwrap();
        }

        let unit = brain.neuron(bias).unwrap();
        assert!(unit.is_bias_unit());
        assert_eq!(unit.bias_weight(), 0.0);
        assert_eq!(unit.output(), BIAS_UNIT_OUTPUT);
        let after: Vec<f64> = unit
            .outgoing()
            .iter()
            .map(|&sid| brain.weight(sid).unwrap())
            .collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_bias_unit_rejects_incoming() {
        let (mut brain, layers) = feed_forward(&NetworkConfig::default(), 8).unwrap();
        let hidden = layers.hidden[0].leaf_neurons()[0];
        assert!(matches!(
            brain.connect(hidden, layers.bias.unwrap()),
            Err(crate::error::BrainError::InvalidConnection { .. })
        ));
    }

    #[test]
    fn test_without_hidden_layers() {
        let config = NetworkConfig {
            inputs: 3,
            hidden: Vec::new(),
            outputs: 2,
            bias_unit: false,
            ..Default::default()
        };
        let (brain, layers) = feed_forward(&config, 1).unwrap();
        assert!(layers.hidden.is_empty());
        assert!(layers.bias.is_none());
        assert_eq!(brain.synapse_count(), 6);
    }

    #[test]
    fn test_same_seed_same_brain() {
        let config = NetworkConfig::default();
        let (a, _) = feed_forward(&config, 5).unwrap();
        let (b, _) = feed_forward(&config, 5).unwrap();
        assert_eq!(a.parameters(), b.parameters());
    }
}
