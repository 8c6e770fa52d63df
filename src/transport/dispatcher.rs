// src/transport/dispatcher.rs

//! The [`Transport`] type: registration front-end and dispatch loop.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::registry::{Registration, Registry};

#[allow(unused_imports)]
use crate::{
    // ---
    log_debug,
    log_error,
    log_trace,
    log_warn,
    Action,
    ActionSet,
    Event,
    Listener,
    OncePolicy,
    TransportBuilder,
    TransportConfig,
};

/// Action-keyed listener registry with synchronous fan-out.
///
/// Each `Transport` owns its registry; construct one per host or module
/// rather than sharing a global. The type is `Send + Sync`, but the internal
/// lock is only held for bookkeeping and never while a listener runs.
///
/// `D` is the event payload type.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use listener_transport::{Action, Event, Listener, Transport};
///
/// let transport: Transport<String> = Transport::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// let listener = Listener::new(move |event: &Event<String>| {
///     sink.lock().unwrap().push(event.data.clone());
/// });
///
/// transport.add_listener(Action::LOG, listener.clone());
/// transport.emit(Action::LOG, "hi".to_string());
///
/// transport.remove_listener(Action::LOG, &listener);
/// transport.emit(Action::LOG, "ignored".to_string());
///
/// assert_eq!(*seen.lock().unwrap(), ["hi"]);
/// ```
pub struct Transport<D = serde_json::Value> {
    // ---
    once_policy: OncePolicy,
    registry: RwLock<Registry<D>>,
}

impl<D> Transport<D> {
    // ---
    /// Create a transport with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Self {
        // ---
        log_debug!(
            "create transport: once_policy={:?} actions={:?}",
            config.once_policy,
            config.actions
        );

        Self {
            once_policy: config.once_policy,
            registry: RwLock::new(Registry::new(config.actions)),
        }
    }

    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }

    pub fn once_policy(&self) -> OncePolicy {
        self.once_policy
    }

    /// The currently recognized actions.
    pub fn actions(&self) -> ActionSet {
        self.read().actions().clone()
    }

    /// Recognize an additional action at runtime.
    ///
    /// Returns `true` if the action was not already recognized.
    pub fn recognize_action(&self, action: impl Into<Action>) -> bool {
        self.write().recognize(action.into())
    }

    /// Register `listener` for `action`, after any existing listeners.
    ///
    /// The same handle may be registered more than once; it is then invoked
    /// once per registration. Always succeeds: an action outside the
    /// recognized set is added to it.
    pub fn add_listener(&self, action: impl Into<Action>, listener: Listener<D>) {
        self.register(action.into(), listener, false)
    }

    /// Remove the first registration of `listener` for `action`.
    ///
    /// Handles compare by identity. Unknown actions and unregistered
    /// listeners are ignored. When a listener was registered several times,
    /// each call removes one registration.
    pub fn remove_listener(&self, action: impl AsRef<str>, listener: &Listener<D>) {
        // ---
        let action = action.as_ref();

        if self.write().remove(action, listener) {
            log_debug!("{action}: removed listener {listener:?}");
        } else {
            log_trace!("{action}: remove_listener found no registration");
        }
    }

    /// Register a one-shot listener for `action`.
    ///
    /// The listener fires at most once. After it has run, the transport's
    /// [`OncePolicy`] decides what is cleaned up:
    ///
    /// - [`OncePolicy::ClearAction`] (default) deletes the entire registry
    ///   entry for `action`, so **every** listener registered for it is
    ///   dropped, not just this one.
    /// - [`OncePolicy::RemoveSelf`] removes only this registration.
    ///
    /// If the listener panics, only its own registration is unlinked and the
    /// policy is not applied.
    pub fn once(&self, action: impl Into<Action>, listener: Listener<D>) {
        self.register(action.into(), listener, true)
    }

    /// Deliver `event` to every listener registered for `event.action`.
    ///
    /// Listeners run synchronously, in insertion order, on the caller's
    /// thread. Sending to an action with no listeners does nothing.
    ///
    /// # Cost
    ///
    /// The registry lock may not be held while a listener runs, so the pass
    /// works from a copy of the action's registrations (one `Vec` of handle
    /// clones per send) rather than walking the list in place. Listeners
    /// appended during the pass are found by one more scan of the list per
    /// round of additions.
    ///
    /// # Panics
    ///
    /// A panic raised by a listener is not caught: it propagates out of this
    /// call and the remaining listeners of the pass are not invoked.
    pub fn send_message(&self, event: &Event<D>) {
        // ---
        let action = event.action.as_str();

        let Some(pass) = self.read().snapshot(action) else {
            log_trace!("{action}: no listeners, message dropped");
            return;
        };

        let generation = pass.generation;
        let mut pending = pass.registrations;
        let mut _delivered = 0usize;

        while let Some(last) = pending.last() {
            let last_seq = last.seq();

            for registration in &pending {
                if self.deliver(action, registration, event) {
                    _delivered += 1;
                }
            }

            // Pick up listeners appended to this list while the pass ran.
            pending = self.read().appended(action, generation, last_seq);
        }

        log_debug!("{action}: dispatched to {_delivered} listener(s)");
    }

    /// Build an [`Event`] and send it.
    pub fn emit(&self, action: impl Into<Action>, data: D) {
        self.send_message(&Event::new(action, data));
    }

    /// Number of live registrations for `action`.
    pub fn listener_count(&self, action: impl AsRef<str>) -> usize {
        self.read().live_count(action.as_ref())
    }

    pub fn has_listeners(&self, action: impl AsRef<str>) -> bool {
        self.listener_count(action) > 0
    }

    /// Drop every registration for `action`.
    ///
    /// Returns how many registrations were dropped. A dispatch already in
    /// progress for `action` still reaches the listeners it had captured.
    pub fn remove_all_listeners(&self, action: impl AsRef<str>) -> usize {
        // ---
        let action = action.as_ref();
        let dropped = self.write().clear(action).unwrap_or(0);

        log_debug!("{action}: removed all {dropped} listener(s)");
        dropped
    }

    fn register(&self, action: Action, listener: Listener<D>, one_shot: bool) {
        // ---
        let added = self.write().add(action.clone(), listener, one_shot);

        if added.new_action {
            log_warn!("{action}: not a recognized action, adding it to the set");
        }
        log_debug!(
            "{action}: registered listener (one_shot={one_shot}, total={})",
            added.count
        );
    }

    /// Invoke one captured registration. Returns `true` if it ran.
    fn deliver(&self, action: &str, registration: &Registration<D>, event: &Event<D>) -> bool {
        // ---
        if registration.is_one_shot() {
            if !registration.claim() {
                return false;
            }
            let mut unlink = UnlinkOnUnwind {
                transport: self,
                action,
                seq: registration.seq(),
                armed: true,
            };
            registration.listener().call(event);
            unlink.armed = false;

            self.finish_one_shot(action, registration);
            return true;
        }

        if !registration.is_live() {
            return false;
        }
        log_trace!("{action}: invoking {:?}", registration.listener());
        registration.listener().call(event);
        true
    }

    fn finish_one_shot(&self, action: &str, registration: &Registration<D>) {
        // ---
        let mut registry = self.write();

        match self.once_policy {
            OncePolicy::ClearAction => {
                let _dropped = registry.clear(action).unwrap_or(0);
                log_debug!("{action}: one-shot fired, cleared {_dropped} registration(s)");
            }
            OncePolicy::RemoveSelf => {
                registry.remove_seq(action, registration.seq());
                log_debug!("{action}: one-shot fired, removed itself");
            }
        }
    }

    // The lock is never held across a listener call, so poisoning can only
    // come from a panic inside registry bookkeeping; the data is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Registry<D>> {
        self.registry.read().unwrap_or_else(|poisoned| {
            log_error!("listener registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<D>> {
        self.registry.write().unwrap_or_else(|poisoned| {
            log_error!("listener registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Unlinks a claimed one-shot registration if its listener unwinds.
struct UnlinkOnUnwind<'a, D> {
    transport: &'a Transport<D>,
    action: &'a str,
    seq: u64,
    armed: bool,
}

impl<D> Drop for UnlinkOnUnwind<'_, D> {
    fn drop(&mut self) {
        // ---
        if self.armed {
            self.transport.write().remove_seq(self.action, self.seq);
            log_debug!("{}: one-shot listener panicked, unlinked", self.action);
        }
    }
}

impl<D> Default for Transport<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for Transport<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("once_policy", &self.once_policy)
            .field("actions", self.read().actions())
            .finish_non_exhaustive()
    }
}
