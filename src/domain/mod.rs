//! Domain layer public interface.
//!
//! Defines the values exchanged between hosts and the transport: action
//! identifiers, the set of actions a transport recognizes, event arguments
//! and listener handles. Nothing here knows how listeners are stored or
//! dispatched.
//!
//! All domain consumers must import symbols via this module, not by
//! referencing individual files directly.

mod action;
mod event;
mod listener;

// --- Domain re-exports ---

pub use action::{
    //
    Action,
    ActionSet,
};
pub use event::Event;
pub use listener::Listener;
