//! Action-keyed listener transport.
//!
//! A small, in-process publish/subscribe dispatcher. Hosts register listener
//! callbacks against named actions; sending a message for an action invokes
//! every listener registered for it, synchronously and in insertion order.
//!
//! The per-action registry is a generic singly linked list ([`LinkedList`]),
//! also usable on its own.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use listener_transport::{Action, Event, Listener, Transport};
//!
//! let transport: Transport<&'static str> = Transport::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let counter = hits.clone();
//! transport.once(Action::ERROR, Listener::new(move |_: &Event<&'static str>| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! transport.emit(Action::ERROR, "disk full");
//! transport.emit(Action::ERROR, "disk still full");
//!
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

// Import all sub modules once...
mod domain;
mod error;
mod linked_list;
mod macros;
mod transport;

mod transport_builder;
mod transport_config;

pub(crate) use macros::{log_debug, log_error, log_trace, log_warn};

pub use error::{Error, Result};
pub use linked_list::{IntoIter, Iter, LinkedList};
pub use transport::Transport;
pub use transport_builder::TransportBuilder;
pub use transport_config::{OncePolicy, TransportConfig};

// --- public re-exports
pub use domain::{
    //
    Action,
    ActionSet,
    Event,
    Listener,
};
