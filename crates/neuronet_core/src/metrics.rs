//! Training metrics and logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for a training run.
pub struct TrainingMetrics {
    epochs: AtomicU64,
    samples: AtomicU64,
    last_error_bits: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl TrainingMetrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            epochs: AtomicU64::new(0),
            samples: AtomicU64::new(0),
            last_error_bits: AtomicU64::new(0f64.to_bits()),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    pub fn record_sample(&self) {
        self.samples.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed epoch and its mean squared error.
    pub fn record_epoch(&self, error: f64) {
        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_error_bits.store(error.to_bits(), Ordering::Relaxed);

        if epoch % self.log_interval == 0 {
            tracing::info!(
                epoch = epoch,
                error = error,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Training progress"
            );
        }
    }

    #[must_use]
    pub fn epochs(&self) -> u64 {
        self.epochs.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_error(&self) -> f64 {
        f64::from_bits(self.last_error_bits.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = TrainingMetrics::new(10);
        assert_eq!(metrics.epochs(), 0);
        assert_eq!(metrics.samples(), 0);
        assert_eq!(metrics.last_error(), 0.0);
    }

    #[test]
    fn test_record_epoch() {
        let metrics = TrainingMetrics::new(1);
        metrics.record_sample();
        metrics.record_sample();
        metrics.record_epoch(0.25);
        assert_eq!(metrics.epochs(), 1);
        assert_eq!(metrics.samples(), 2);
        assert_eq!(metrics.last_error(), 0.25);
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging();
        init_logging();
    }
}
