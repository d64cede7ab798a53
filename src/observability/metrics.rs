//! Counters for validation and escaping activity.
//!
//! Counts are kept in atomics so the tracker can be cloned into every tool
//! handler and updated without locking.

use crate::error::ValidationStage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Process-wide counters for the server.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    validations_total: Arc<AtomicU64>,
    syntax_rejections_total: Arc<AtomicU64>,
    listener_rejections_total: Arc<AtomicU64>,
    dns_rejections_total: Arc<AtomicU64>,
    escapes_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            validations_total: Arc::new(AtomicU64::new(0)),
            syntax_rejections_total: Arc::new(AtomicU64::new(0)),
            listener_rejections_total: Arc::new(AtomicU64::new(0)),
            dns_rejections_total: Arc::new(AtomicU64::new(0)),
            escapes_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a finished validation. `rejected_by` is `None` for accepted addresses.
    pub fn track_validation(&self, duration_ms: u128, rejected_by: Option<ValidationStage>) {
        self.validations_total.fetch_add(1, Ordering::Relaxed);

        let counter = match rejected_by {
            Some(ValidationStage::Syntax) => Some(&self.syntax_rejections_total),
            Some(ValidationStage::Listener) => Some(&self.listener_rejections_total),
            Some(ValidationStage::Dns) => Some(&self.dns_rejections_total),
            None => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            duration_ms = duration_ms,
            valid = rejected_by.is_none(),
            stage = rejected_by.map(|s| s.as_str()).unwrap_or("none"),
            "Validation completed"
        );
    }

    /// Track one tag-escaping call.
    pub fn track_escape(&self, input_len: usize) {
        self.escapes_total.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(input_len, "Content escaped");
    }

    pub fn validations_total(&self) -> u64 {
        self.validations_total.load(Ordering::Relaxed)
    }

    /// Rejections attributed to one stage.
    pub fn rejections_total(&self, stage: ValidationStage) -> u64 {
        match stage {
            ValidationStage::Syntax => self.syntax_rejections_total.load(Ordering::Relaxed),
            ValidationStage::Listener => self.listener_rejections_total.load(Ordering::Relaxed),
            ValidationStage::Dns => self.dns_rejections_total.load(Ordering::Relaxed),
        }
    }

    pub fn escapes_total(&self) -> u64 {
        self.escapes_total.load(Ordering::Relaxed)
    }

    /// Get the rejection rate (0.0 to 1.0) across all stages.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.validations_total() as f64;
        let rejected = (self.rejections_total(ValidationStage::Syntax)
            + self.rejections_total(ValidationStage::Listener)
            + self.rejections_total(ValidationStage::Dns)) as f64;

        if total == 0.0 {
            0.0
        } else {
            rejected / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Validations: {}\n\
             Rejected (syntax): {}\n\
             Rejected (listener): {}\n\
             Rejected (dns): {}\n\
             Rejection Rate: {:.2}%\n\
             Escapes: {}",
            self.validations_total(),
            self.rejections_total(ValidationStage::Syntax),
            self.rejections_total(ValidationStage::Listener),
            self.rejections_total(ValidationStage::Dns),
            self.rejection_rate() * 100.0,
            self.escapes_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
