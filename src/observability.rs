//! Tracing setup and submission counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber; `RUST_LOG` wins over `default_filter`
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Metrics handle for recording submit outcomes
#[derive(Debug, Default)]
pub struct Metrics {
    submissions: AtomicU64,
    empty_scripts: AtomicU64,
    downloads: AtomicU64,
    server_errors: AtomicU64,
    failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission(&self) {
        self.submissions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "submissions", "Metric incremented");
    }

    pub fn empty_script(&self) {
        self.empty_scripts.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "empty_scripts", "Metric incremented");
    }

    pub fn download(&self) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "downloads", "Metric incremented");
    }

    pub fn server_error(&self) {
        self.server_errors.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "server_errors", "Metric incremented");
    }

    pub fn failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "failures", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submissions: self.submissions.load(Ordering::Relaxed),
            empty_scripts: self.empty_scripts.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub submissions: u64,
    pub empty_scripts: u64,
    pub downloads: u64,
    pub server_errors: u64,
    pub failures: u64,
}
