//! Metrics sink boundary.
//!
//! Construction code emits `MetricsEvent`s; only the global sink writes
//! into `obs::metrics` state.

use crate::{obs::metrics, predicate::PredicateType};
use fieldkit_primitives::ExpressionKind;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// CollapseShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollapseShape {
    Constant,
    Single,
    Membership,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    PredicateBuilt {
        predicate: PredicateType,
    },
    PredicateNegated {
        predicate: PredicateType,
    },
    EnumPredicateCollapsed {
        enum_path: &'static str,
        shape: CollapseShape,
    },
    ValueRequired {
        kind: ExpressionKind,
    },
    ComparatorBuilt {
        kind: ExpressionKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::PredicateBuilt { predicate } => {
                m.ops.predicates_built = m.ops.predicates_built.saturating_add(1);
                let entry = m.predicates.entry(predicate.label().to_string()).or_default();
                *entry = entry.saturating_add(1);
            }
            MetricsEvent::PredicateNegated { .. } => {
                m.ops.predicates_negated = m.ops.predicates_negated.saturating_add(1);
            }
            MetricsEvent::EnumPredicateCollapsed { shape, .. } => match shape {
                CollapseShape::Constant => {
                    m.ops.enum_collapsed_constant = m.ops.enum_collapsed_constant.saturating_add(1);
                }
                CollapseShape::Single => {
                    m.ops.enum_collapsed_single = m.ops.enum_collapsed_single.saturating_add(1);
                }
                CollapseShape::Membership => {
                    m.ops.enum_collapsed_membership =
                        m.ops.enum_collapsed_membership.saturating_add(1);
                }
            },
            MetricsEvent::ValueRequired { .. } => {
                m.ops.value_required = m.ops.value_required.saturating_add(1);
            }
            MetricsEvent::ComparatorBuilt { .. } => {
                m.ops.comparators_built = m.ops.comparators_built.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let installed = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match installed {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state of this thread.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state on this thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
///
/// The previous sink is restored on every exit path, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
