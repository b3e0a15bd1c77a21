use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

///
/// EventState
/// Ephemeral, in-memory counters for expression and predicate construction.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) predicates: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    pub predicates_built: u64,
    pub predicates_negated: u64,
    pub comparators_built: u64,
    pub value_required: u64,

    // Enum range collapsing, by resulting shape
    pub enum_collapsed_constant: u64,
    pub enum_collapsed_single: u64,
    pub enum_collapsed_membership: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,

    /// Predicates built, keyed by predicate type label.
    pub predicates: BTreeMap<String, u64>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
    static ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably; a no-op returning `None` while disabled.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> Option<R> {
    if !is_enabled() {
        return None;
    }

    Some(EVENT_STATE.with(|m| f(&mut m.borrow_mut())))
}

pub(crate) fn is_enabled() -> bool {
    ENABLED.with(Cell::get)
}

pub(crate) fn set_enabled(enabled: bool) {
    ENABLED.with(|cell| cell.set(enabled));
}

/// Reset all counters.
pub(crate) fn reset_all() {
    EVENT_STATE.with(|m| *m.borrow_mut() = EventState::default());
}

#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        predicates: m.predicates.clone(),
    })
}
