use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BRAIN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a brain arena. Every handle carries the id of the brain that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrainId(u64);

impl BrainId {
    /// Allocates a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_BRAIN_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brain#{}", self.0)
    }
}

/// Opaque handle to a neuron slot inside a brain arena.
///
/// Slots are never reused, so a handle to a removed neuron stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId {
    brain: BrainId,
    slot: usize,
}

impl NeuronId {
    #[must_use]
    pub fn new(brain: BrainId, slot: usize) -> Self {
        Self { brain, slot }
    }

    /// Brain that issued this handle.
    #[must_use]
    pub fn brain(self) -> BrainId {
        self.brain
    }

    /// Arena slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.slot
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}@{}", self.slot, self.brain.0)
    }
}

/// Opaque handle to a synapse slot inside a brain arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynapseId {
    brain: BrainId,
    slot: usize,
}

impl SynapseId {
    #[must_use]
    pub fn new(brain: BrainId, slot: usize) -> Self {
        Self { brain, slot }
    }

    #[must_use]
    pub fn brain(self) -> BrainId {
        self.brain
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.slot
    }
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}@{}", self.slot, self.brain.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_ids_are_unique() {
        let a = BrainId::next();
        let b = BrainId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_handles_order_by_slot_within_brain() {
        let brain = BrainId::next();
        let n0 = NeuronId::new(brain, 0);
        let n3 = NeuronId::new(brain, 3);
        assert!(n0 < n3);
        assert_eq!(n3.index(), 3);
        assert_eq!(n3.brain(), brain);
    }

    #[test]
    fn test_handles_from_different_brains_differ() {
        let a = NeuronId::new(BrainId::next(), 0);
        let b = NeuronId::new(BrainId::next(), 0);
        assert_ne!(a, b);
    }
}
