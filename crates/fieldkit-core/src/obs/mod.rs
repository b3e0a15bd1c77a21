//! Observability: thread-local event counters and the sink they flow through.
//!
//! Expressions and predicates never touch counters directly; every event is
//! routed through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;


use fieldkit_config::MetricsConfig;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    CollapseShape, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};

/// Apply the metrics section of a loaded configuration to this thread.
///
/// The enabled flag lives beside the counters in thread-local state, so
/// threads spawned afterwards start enabled and must call this themselves.
pub fn configure(config: &MetricsConfig) {
    metrics::set_enabled(config.enabled);
    log::debug!("fieldkit metrics enabled={}", config.enabled);
}
