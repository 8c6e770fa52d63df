// src/domain/event.rs

use serde::{Deserialize, Serialize};

use super::Action;

/// The argument handed to every listener on dispatch.
///
/// The transport routes on `action` and never inspects `data`.
///
/// ```
/// use listener_transport::{Action, Event};
///
/// let event = Event::new(Action::LOG, "hi");
/// assert_eq!(event.action, Action::log());
/// assert_eq!(event.data, "hi");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event<D> {
    // ---
    /// Routing key; selects which listeners are invoked.
    pub action: Action,

    /// Opaque payload.
    pub data: D,
}

impl<D> Event<D> {
    pub fn new(action: impl Into<Action>, data: D) -> Self {
        Self {
            action: action.into(),
            data,
        }
    }
}
