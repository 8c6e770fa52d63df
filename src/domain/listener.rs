// src/domain/listener.rs

//! Listener handles.
//!
//! A [`Listener`] is a shared, type-erased callback. Hosts keep a clone of the
//! handle they registered so they can remove it later; the transport keeps the
//! other clone in its registry.

use std::fmt;
use std::sync::Arc;

use super::Event;

type Callback<D> = dyn Fn(&Event<D>) + Send + Sync;

/// A callback registered against an action.
///
/// Equality is **identity**: clones of one handle compare equal, while two
/// handles built from behaviorally identical closures do not. This is what
/// lets a host register two look-alike listeners and remove them
/// independently.
///
/// ```
/// use listener_transport::{Event, Listener};
///
/// let a: Listener<()> = Listener::new(|_: &Event<()>| {});
/// let b: Listener<()> = Listener::new(|_: &Event<()>| {});
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Listener<D>(Arc<Callback<D>>);

impl<D> Listener<D> {
    // ---
    /// Wrap a closure into a listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event<D>) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invoke the callback synchronously.
    pub fn call(&self, event: &Event<D>) {
        (self.0)(event)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl<D> Clone for Listener<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> PartialEq for Listener<D> {
    fn eq(&self, other: &Self) -> bool {
        // Data pointers only; vtable addresses are not stable across codegen units.
        self.addr() == other.addr()
    }
}

impl<D> Eq for Listener<D> {}

impl<D> fmt::Debug for Listener<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.addr()).finish()
    }
}
