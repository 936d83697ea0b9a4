mod common;

use common::xor_brain;
use neuronet_lib::model::{evaluate, signs_match, xor_samples, Trainer, TrainingConfig};

fn config() -> TrainingConfig {
    TrainingConfig {
        learning_rate: 0.09,
        max_epochs: 10_000,
        ..Default::default()
    }
}

#[test]
fn test_xor_converges_for_every_seed() {
    let samples = xor_samples();

    for seed in 0..10 {
        let (mut brain, _) = xor_brain(seed);
        let trainer = Trainer::new(config());
        let report = trainer.train(&mut brain, &samples).unwrap();

        assert!(report.converged, "seed {seed} did not learn XOR");
        assert!(report.epochs <= 10_000, "seed {seed} took {} epochs", report.epochs);
        assert!(signs_match(&mut brain, &samples).unwrap());
    }
}

#[test]
fn test_training_reduces_error() {
    let samples = xor_samples();
    let (mut brain, _) = xor_brain(42);
    let before = evaluate(&mut brain, &samples).unwrap();

    let trainer = Trainer::new(TrainingConfig {
        max_epochs: 2_000,
        ..config()
    });
    trainer.train(&mut brain, &samples).unwrap();

    let after = evaluate(&mut brain, &samples).unwrap();
    assert!(after < before, "error went from {before} to {after}");
    assert!(trainer.metrics().epochs() > 0);
}
