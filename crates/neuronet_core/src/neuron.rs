//! Role-tagged processing unit.
//!
//! A neuron owns its scalar state and its local view of adjacency. The brain
//! pulls incoming signals and pushes outputs through the synapse arena; the
//! arithmetic for each role lives here.

use crate::activation::{ActivationFunction, SharedActivation};
use neuronet_data::{BrainId, Role, SynapseId};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Neuron {
    role: Role,
    activity: f64,
    output: f64,
    bias_weight: f64,
    error_term: f64,
    injected: f64,
    desired: Option<f64>,
    activation: SharedActivation,
    incoming: BTreeSet<SynapseId>,
    outgoing: BTreeSet<SynapseId>,
    /// Set for constant-bias units, which always emit this value.
    fixed_output: Option<f64>,
}

impl Neuron {
    #[must_use]
    pub fn new(role: Role, bias_weight: f64, activation: SharedActivation) -> Self {
        Self {
            role,
            activity: 0.0,
            output: 0.0,
            bias_weight,
            error_term: 0.0,
            injected: 0.0,
            desired: None,
            activation,
            incoming: BTreeSet::new(),
            outgoing: BTreeSet::new(),
            fixed_output: None,
        }
    }

    /// A hidden unit that always outputs `value` and never learns.
    #[must_use]
    pub fn bias_unit(value: f64, activation: SharedActivation) -> Self {
        Self {
            fixed_output: Some(value),
            ..Self::new(Role::Hidden, 0.0, activation)
        }
    }

    #[must_use]
    pub fn is_bias_unit(&self) -> bool {
        self.fixed_output.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Weighted input sum plus bias, before the activation function.
    #[must_use]
    pub fn activity(&self) -> f64 {
        self.activity
    }

    #[must_use]
    pub fn output(&self) -> f64 {
        self.output
    }

    #[must_use]
    pub fn bias_weight(&self) -> f64 {
        self.bias_weight
    }

    #[must_use]
    pub fn error_term(&self) -> f64 {
        self.error_term
    }

    /// Most recent desired value, if one was set.
    #[must_use]
    pub fn desired(&self) -> Option<f64> {
        self.desired
    }

    #[must_use]
    pub fn activation(&self) -> &dyn ActivationFunction {
        self.activation.as_ref()
    }

    #[must_use]
    pub fn incoming(&self) -> &BTreeSet<SynapseId> {
        &self.incoming
    }

    #[must_use]
    pub fn outgoing(&self) -> &BTreeSet<SynapseId> {
        &self.outgoing
    }

    /// Number of incident synapses.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    /// Copy whose synapse handles are reissued under `brain`.
    pub(crate) fn reissued(&self, brain: BrainId) -> Self {
        let rehome = |set: &BTreeSet<SynapseId>| -> BTreeSet<SynapseId> {
            set.iter()
                .map(|sid| SynapseId::new(brain, sid.index()))
                .collect()
        };
        Self {
            incoming: rehome(&self.incoming),
            outgoing: rehome(&self.outgoing),
            ..self.clone()
        }
    }

    pub(crate) fn incoming_mut(&mut self) -> &mut BTreeSet<SynapseId> {
        &mut self.incoming
    }

    pub(crate) fn outgoing_mut(&mut self) -> &mut BTreeSet<SynapseId> {
        &mut self.outgoing
    }

    pub(crate) fn inject(&mut self, value: f64) {
        self.injected = value;
    }

    pub(crate) fn set_desired(&mut self, value: f64) {
        self.desired = Some(value);
    }

    pub(crate) fn set_bias_weight(&mut self, bias_weight: f64) {
        self.bias_weight = bias_weight;
    }

    /// Computes activity and output from the summed incoming signal.
    ///
    /// Input neurons pass the injected value through unchanged: no bias and
    /// no activation function.
    pub fn fire(&mut self, net_input: f64) -> f64 {
        if let Some(value) = self.fixed_output {
            self.activity = value;
            self.output = value;
        } else if self.role.accepts_external_input() {
            self.activity = self.injected;
            self.output = self.injected;
        } else {
            self.activity = net_input + self.bias_weight;
            self.output = self.activation.activate(self.activity);
        }
        self.output
    }

    /// Computes the error term.
    ///
    /// `downstream` is the sum of the outgoing synapses' differentials and is
    /// ignored by Output neurons, which use their desired value instead. A
    /// hidden sink has an empty sum and therefore a zero error term. Bias
    /// units always get zero, so their bias never moves.
    pub fn compute_error_term(&mut self, downstream: f64) -> f64 {
        if self.is_bias_unit() {
            self.error_term = 0.0;
            return 0.0;
        }
        let slope = self.activation.derivative(self.activity);
        self.error_term = match self.role {
            Role::Input => 0.0,
            Role::Hidden => slope * downstream,
            Role::Output => slope * (self.desired.unwrap_or(self.output) - self.output),
        };
        self.error_term
    }

    pub fn learn_bias(&mut self, rate: f64) {
        self.bias_weight += rate * self.error_term;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::default_activation;

    #[test]
    fn test_input_passes_injected_value_through() {
        let mut n = Neuron::new(Role::Input, 0.7, default_activation());
        n.inject(3.0);
        assert_eq!(n.fire(100.0), 3.0);
        assert_eq!(n.activity(), 3.0);
    }

    #[test]
    fn test_hidden_adds_bias_and_activates() {
        let mut n = Neuron::new(Role::Hidden, 0.25, default_activation());
        let out = n.fire(0.5);
        assert_eq!(n.activity(), 0.75);
        assert_eq!(out, 0.75f64.tanh());
    }

    #[test]
    fn test_bias_only_unit_without_incoming() {
        let mut n = Neuron::new(Role::Hidden, -0.4, default_activation());
        assert_eq!(n.fire(0.0), (-0.4f64).tanh());
    }

    #[test]
    fn test_bias_unit_emits_constant_and_never_learns() {
        let mut n = Neuron::bias_unit(1.0, default_activation());
        assert!(n.is_bias_unit());
        assert_eq!(n.role(), Role::Hidden);
        assert_eq!(n.fire(7.5), 1.0);
        assert_eq!(n.compute_error_term(3.0), 0.0);
        n.learn_bias(0.5);
        assert_eq!(n.bias_weight(), 0.0);
        assert_eq!(n.fire(-2.0), 1.0);
    }

    #[test]
    fn test_output_error_uses_desired_value() {
        let mut n = Neuron::new(Role::Output, 0.0, default_activation());
        n.fire(0.5);
        n.set_desired(1.0);
        let expected = (1.0 - 0.5f64.tanh().powi(2)) * (1.0 - 0.5f64.tanh());
        let err = n.compute_error_term(123.0);
        assert!((err - expected).abs() < 1e-12);
    }

    #[test]
    fn test_output_without_desired_has_zero_error() {
        let mut n = Neuron::new(Role::Output, 0.0, default_activation());
        n.fire(0.3);
        assert_eq!(n.compute_error_term(5.0), 0.0);
    }

    #[test]
    fn test_hidden_error_scales_downstream_sum() {
        let mut n = Neuron::new(Role::Hidden, 0.0, default_activation());
        n.fire(0.0);
        assert_eq!(n.compute_error_term(0.5), 0.5);
        n.learn_bias(0.1);
        assert!((n.bias_weight() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_hidden_sink_error_is_zero() {
        let mut n = Neuron::new(Role::Hidden, 0.3, default_activation());
        n.fire(1.0);
        assert_eq!(n.compute_error_term(0.0), 0.0);
    }
}
