//! Weighted directed edge between two neurons.

use neuronet_data::{BrainId, NeuronId};

/// A synapse caches the last value pushed by its source neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    source: NeuronId,
    destination: NeuronId,
    weight: f64,
    cached_input: f64,
}

impl Synapse {
    #[must_use]
    pub fn new(source: NeuronId, destination: NeuronId, weight: f64) -> Self {
        Self {
            source,
            destination,
            weight,
            cached_input: 0.0,
        }
    }

    #[must_use]
    pub fn source(&self) -> NeuronId {
        self.source
    }

    #[must_use]
    pub fn destination(&self) -> NeuronId {
        self.destination
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    #[must_use]
    pub fn cached_input(&self) -> f64 {
        self.cached_input
    }

    pub fn set_input(&mut self, value: f64) {
        self.cached_input = value;
    }

    /// Weighted signal delivered to the destination.
    #[must_use]
    pub fn output(&self) -> f64 {
        self.cached_input * self.weight
    }

    /// Contribution of this edge to the source neuron's error sum.
    #[must_use]
    pub fn differential(&self, destination_error: f64) -> f64 {
        self.weight * destination_error
    }

    /// Delta rule. The cached input is the source neuron's output from the last propagate.
    pub fn learn(&mut self, rate: f64, destination_error: f64) {
        self.weight += rate * self.cached_input * destination_error;
    }

    /// Copy whose endpoint handles are reissued under `brain`.
    pub(crate) fn reissued(&self, brain: BrainId) -> Self {
        Self {
            source: NeuronId::new(brain, self.source.index()),
            destination: NeuronId::new(brain, self.destination.index()),
            ..self.clone()
        }
    }

    /// True when `neuron` is either endpoint.
    #[must_use]
    pub fn touches(&self, neuron: NeuronId) -> bool {
        self.source == neuron || self.destination == neuron
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuronet_data::BrainId;

    fn synapse(weight: f64) -> Synapse {
        let brain = BrainId::next();
        Synapse::new(NeuronId::new(brain, 0), NeuronId::new(brain, 1), weight)
    }

    #[test]
    fn test_output_is_weighted_input() {
        let mut s = synapse(0.5);
        assert_eq!(s.output(), 0.0);
        s.set_input(-2.0);
        assert_eq!(s.output(), -1.0);
    }

    #[test]
    fn test_differential_scales_error() {
        let s = synapse(-0.25);
        assert_eq!(s.differential(4.0), -1.0);
    }

    #[test]
    fn test_learn_applies_delta_rule() {
        let mut s = synapse(0.1);
        s.set_input(0.5);
        s.learn(0.2, 3.0);
        assert!((s.weight() - (0.1 + 0.2 * 0.5 * 3.0)).abs() < 1e-12);
        assert_eq!(s.cached_input(), 0.5);
    }

    #[test]
    fn test_touches_endpoints_only() {
        let s = synapse(1.0);
        assert!(s.touches(s.source()));
        assert!(s.touches(s.destination()));
        assert!(!s.touches(NeuronId::new(s.source().brain(), 9)));
    }
}
