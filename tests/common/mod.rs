#![allow(dead_code)]

use neuronet_lib::model::{feed_forward, Brain, Layers, NetworkConfig, NeuronId, Role};

/// The 2-4-1 XOR network with a bias unit.
pub fn xor_brain(seed: u64) -> (Brain, Layers) {
    feed_forward(&NetworkConfig::default(), seed).expect("default network builds")
}

/// One input feeding one output through a synapse of the given weight, zero bias.
pub fn single_edge(weight: f64) -> (Brain, NeuronId, NeuronId) {
    let mut brain = Brain::with_seed(0);
    let input = brain.add_neuron(Role::Input);
    let output = brain.add_neuron(Role::Output);
    brain.add_synapse(input, output, weight).unwrap();
    brain.set_bias_weight(output, 0.0).unwrap();
    (brain, input, output)
}

/// Number of live synapses touching `id`.
pub fn incident_synapses(brain: &Brain, id: NeuronId) -> usize {
    brain
        .synapses()
        .filter(|(_, s)| s.source() == id || s.destination() == id)
        .count()
}
