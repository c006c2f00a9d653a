//! Background workers and their metrics.

mod match_worker;
mod metrics;

pub use metrics::ArenaMetrics;

pub(crate) use match_worker::run_worker;
pub(crate) use metrics::MetricsRecorder;
