//! Listener transport.
//!
//! An in-process, synchronous dispatcher: listeners are registered against
//! actions and every message sent for an action is fanned out to its
//! listeners, in insertion order, on the sender's own call stack.
//!
//! ## Dispatch Semantics
//!
//! - Listeners run in the order they were registered.
//! - There is no snapshot isolation. A listener removed by an earlier
//!   listener of the same pass is skipped; a listener appended to the same
//!   list during the pass is reached at its end.
//! - Listeners may call back into the transport (add, remove, send) while a
//!   dispatch is running.
//! - A panicking listener aborts delivery to the rest of the pass and the
//!   panic propagates to the sender.
//!
//! ## Non-Goals
//!
//! - Asynchronous or cross-process delivery
//! - Priorities, wildcards, or namespaced actions
//! - Persistence

mod dispatcher;
mod registry;

pub use dispatcher::Transport;
