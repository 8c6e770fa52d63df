// src/transport/registry.rs

//! Listener registry.
//!
//! Maps each action to a [`LinkedList`] of registrations. Lists are created
//! on first registration and only dropped by an explicit clear. The registry
//! itself is plain data; locking and dispatch live in `dispatcher.rs`.

use std::collections::hash_map::{Entry as MapEntry, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Action, ActionSet, LinkedList, Listener};

/// One listener stored against one action.
///
/// Clones share the liveness flag, so a dispatch pass holding a clone sees a
/// removal made while the pass is running.
pub(super) struct Registration<D> {
    listener: Listener<D>,
    live: Arc<AtomicBool>,
    one_shot: bool,
    seq: u64,
}

impl<D> Registration<D> {
    // ---
    pub(super) fn listener(&self) -> &Listener<D> {
        &self.listener
    }

    pub(super) fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    /// Registry-wide insertion sequence; increases along every list.
    pub(super) fn seq(&self) -> u64 {
        self.seq
    }

    pub(super) fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Take the right to fire. Returns `true` for exactly one caller.
    pub(super) fn claim(&self) -> bool {
        self.live.swap(false, Ordering::AcqRel)
    }

    fn retire(&self) {
        self.live.store(false, Ordering::Release);
    }
}

impl<D> Clone for Registration<D> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            live: Arc::clone(&self.live),
            one_shot: self.one_shot,
            seq: self.seq,
        }
    }
}

/// The list registered under one action.
///
/// `generation` distinguishes a list from a later one created under the same
/// action after a clear.
struct ActionEntry<D> {
    generation: u64,
    listeners: LinkedList<Registration<D>>,
}

/// Outcome of [`Registry::add`].
pub(super) struct Added {
    /// Registrations now stored for the action.
    pub(super) count: usize,
    /// The action was not recognized before this registration.
    pub(super) new_action: bool,
}

/// Registrations captured for one dispatch pass.
pub(super) struct Pass<D> {
    pub(super) generation: u64,
    pub(super) registrations: Vec<Registration<D>>,
}

pub(super) struct Registry<D> {
    // ---
    actions: ActionSet,
    entries: HashMap<Action, ActionEntry<D>>,
    next_seq: u64,
    next_generation: u64,
}

impl<D> Registry<D> {
    // ---
    pub(super) fn new(actions: ActionSet) -> Self {
        Self {
            actions,
            entries: HashMap::new(),
            next_seq: 0,
            next_generation: 0,
        }
    }

    pub(super) fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub(super) fn recognize(&mut self, action: Action) -> bool {
        self.actions.insert(action)
    }

    /// Append a registration, creating the action's list if needed.
    ///
    /// An action outside the recognized set is added to it first; the
    /// returned [`Added`] says whether that happened.
    pub(super) fn add(&mut self, action: Action, listener: Listener<D>, one_shot: bool) -> Added {
        // ---
        let new_action = self.actions.insert(action.clone());

        self.next_seq += 1;
        let registration = Registration {
            listener,
            live: Arc::new(AtomicBool::new(true)),
            one_shot,
            seq: self.next_seq,
        };

        let entry = match self.entries.entry(action) {
            MapEntry::Occupied(occupied) => occupied.into_mut(),
            MapEntry::Vacant(vacant) => {
                self.next_generation += 1;
                vacant.insert(ActionEntry {
                    generation: self.next_generation,
                    listeners: LinkedList::new(),
                })
            }
        };

        entry.listeners.add(registration);

        Added {
            count: entry.listeners.len(),
            new_action,
        }
    }

    /// Remove the first live registration of `listener` under `action`.
    pub(super) fn remove(&mut self, action: &str, listener: &Listener<D>) -> bool {
        // ---
        let Some(entry) = self.entries.get_mut(action) else {
            return false;
        };

        let removed = entry
            .listeners
            .remove_first_by(|r| r.is_live() && r.listener == *listener);

        match removed {
            Some(registration) => {
                registration.retire();
                true
            }
            None => false,
        }
    }

    /// Remove the registration with the given sequence number.
    pub(super) fn remove_seq(&mut self, action: &str, seq: u64) -> bool {
        // ---
        self.entries
            .get_mut(action)
            .and_then(|entry| entry.listeners.remove_first_by(|r| r.seq == seq))
            .map(|registration| registration.retire())
            .is_some()
    }

    /// Drop the whole list for `action`, returning how many registrations it held.
    ///
    /// Registrations are detached, not retired: a pass that already captured
    /// them still delivers to them.
    pub(super) fn clear(&mut self, action: &str) -> Option<usize> {
        self.entries.remove(action).map(|entry| entry.listeners.len())
    }

    /// Stored registrations for `action`, including retired ones still linked.
    #[cfg(test)]
    pub(super) fn stored_count(&self, action: &str) -> usize {
        self.entries
            .get(action)
            .map_or(0, |entry| entry.listeners.len())
    }

    pub(super) fn live_count(&self, action: &str) -> usize {
        self.entries
            .get(action)
            .map_or(0, |entry| entry.listeners.iter().filter(|r| r.is_live()).count())
    }

    /// Capture the current list for `action`, in insertion order.
    pub(super) fn snapshot(&self, action: &str) -> Option<Pass<D>> {
        // ---
        let entry = self.entries.get(action)?;

        Some(Pass {
            generation: entry.generation,
            registrations: entry.listeners.iter().cloned().collect(),
        })
    }

    /// Registrations appended to the same list after `after_seq`.
    ///
    /// Empty when the list has since been cleared or replaced.
    pub(super) fn appended(&self, action: &str, generation: u64, after_seq: u64) -> Vec<Registration<D>> {
        // ---
        match self.entries.get(action) {
            Some(entry) if entry.generation == generation => entry
                .listeners
                .iter()
                .filter(|r| r.seq > after_seq)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::Event;

    fn noop() -> Listener<()> {
        Listener::new(|_: &Event<()>| {})
    }

    #[test]
    fn add_recognizes_unlisted_action() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());

        let added = registry.add(Action::from("METRIC"), noop(), false);

        assert!(added.new_action);
        assert_eq!(added.count, 1);
        assert!(registry.actions().contains(&Action::from("METRIC")));
        assert!(!registry.add(Action::from("METRIC"), noop(), false).new_action);
    }

    #[test]
    fn add_counts_registrations_per_action() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());
        let listener = noop();

        assert_eq!(registry.add(Action::log(), listener.clone(), false).count, 1);
        assert_eq!(registry.add(Action::log(), listener, false).count, 2);
        assert_eq!(registry.add(Action::error(), noop(), false).count, 1);
        assert!(!registry.add(Action::error(), noop(), false).new_action);
    }

    #[test]
    fn remove_retires_captured_clone() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());
        let listener = noop();
        registry.add(Action::log(), listener.clone(), false);

        let pass = registry.snapshot("LOG").unwrap();
        assert!(registry.remove("LOG", &listener));

        assert!(!pass.registrations[0].is_live());
        assert_eq!(registry.live_count("LOG"), 0);
    }

    #[test]
    fn clear_detaches_without_retiring() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());
        registry.add(Action::log(), noop(), false);
        registry.add(Action::log(), noop(), false);

        let pass = registry.snapshot("LOG").unwrap();

        assert_eq!(registry.clear("LOG"), Some(2));
        assert!(pass.registrations.iter().all(Registration::is_live));
        assert!(registry.snapshot("LOG").is_none());
    }

    #[test]
    fn appended_follows_only_the_same_generation() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());
        registry.add(Action::log(), noop(), false);
        let pass = registry.snapshot("LOG").unwrap();
        let last = pass.registrations[0].seq();

        registry.add(Action::log(), noop(), false);
        assert_eq!(registry.appended("LOG", pass.generation, last).len(), 1);

        registry.clear("LOG");
        registry.add(Action::log(), noop(), false);
        assert!(registry.appended("LOG", pass.generation, last).is_empty());
    }

    #[test]
    fn claim_succeeds_once() {
        // ---
        let mut registry = Registry::new(ActionSet::starter());
        registry.add(Action::log(), noop(), true);
        let pass = registry.snapshot("LOG").unwrap();
        let registration = &pass.registrations[0];

        assert!(registration.is_one_shot());
        assert!(registration.claim());
        assert!(!registration.claim());
    }
}
