// src/domain/action.rs

//! Action identifiers and the recognized-action set.
//!
//! An [`Action`] names a class of events. Matching is exact string equality;
//! there is no wildcard or namespace syntax.
//!
//! Which actions a transport knows about is configuration, not code: an
//! [`ActionSet`] ships with a starter set (`LOG`, `ERROR`) and is open for
//! hosts to extend. Registering a listener under a name outside the set
//! extends it rather than failing.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An action identifier.
///
/// Actions are immutable, cheap to clone, and safe to share across threads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Action(pub Arc<str>);

impl Action {
    // ---
    /// Name of the starter logging action.
    pub const LOG: &'static str = "LOG";

    /// Name of the starter error action.
    pub const ERROR: &'static str = "ERROR";

    /// The starter logging action.
    pub fn log() -> Self {
        Self::from(Self::LOG)
    }

    /// The starter error action.
    pub fn error() -> Self {
        Self::from(Self::ERROR)
    }

    /// Validate and build an action from a configured name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for empty or whitespace-only names.
    pub fn parse(name: &str) -> Result<Self> {
        // ---
        if name.trim().is_empty() {
            return Err(Error::InvalidAction(name.to_owned()));
        }
        Ok(Self::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> From<T> for Action
where
    T: Into<Arc<str>>,
{
    fn from(value: T) -> Self {
        // ---
        Action(value.into())
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Action {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of actions a transport recognizes.
///
/// Either an explicit, growable set of names or permissive ("any action",
/// nothing recorded). The default is the starter set `{LOG, ERROR}`.
///
/// # Example
///
/// ```
/// use listener_transport::{Action, ActionSet};
///
/// let mut actions = ActionSet::default();
/// actions.insert(Action::parse("AUDIT")?);
///
/// assert!(actions.contains(&Action::log()));
/// assert!(actions.contains(&Action::from("AUDIT")));
/// assert!(!actions.contains(&Action::from("METRIC")));
/// # Ok::<(), listener_transport::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSet {
    // None means every action is recognized.
    allowed: Option<BTreeSet<Action>>,
}

impl ActionSet {
    // ---
    /// The starter set: `LOG` and `ERROR`.
    pub fn starter() -> Self {
        [Action::log(), Action::error()].into_iter().collect()
    }

    /// A set recognizing no actions until some are inserted.
    pub fn empty() -> Self {
        Self {
            allowed: Some(BTreeSet::new()),
        }
    }

    /// A permissive set recognizing every action name.
    pub fn any() -> Self {
        Self { allowed: None }
    }

    /// Returns `true` if this set accepts every action.
    pub fn is_any(&self) -> bool {
        self.allowed.is_none()
    }

    /// Add an action. Returns `true` if it was not already recognized.
    ///
    /// Inserting into a permissive set is a no-op returning `false`.
    pub fn insert(&mut self, action: Action) -> bool {
        match &mut self.allowed {
            Some(allowed) => allowed.insert(action),
            None => false,
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn contains(&self, action: &Action) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.contains(action),
            None => true,
        }
    }

    /// Explicitly recognized actions, in name order. Empty for a permissive set.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.allowed.iter().flatten()
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::starter()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            allowed: Some(iter.into_iter().collect()),
        }
    }
}

impl Extend<Action> for ActionSet {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.insert(action);
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn starter_set_has_log_and_error() {
        // ---
        let actions = ActionSet::default();

        let names: Vec<&str> = actions.iter().map(Action::as_str).collect();
        assert_eq!(names, ["ERROR", "LOG"]);
    }

    #[test]
    fn empty_names_are_rejected() {
        // ---
        assert!(matches!(Action::parse(""), Err(Error::InvalidAction(_))));
        assert!(matches!(Action::parse("  "), Err(Error::InvalidAction(_))));
        assert_eq!(Action::parse("LOG").ok(), Some(Action::log()));
    }

    #[test]
    fn insert_reports_only_new_actions() {
        // ---
        let mut actions = ActionSet::starter();

        assert!(!actions.contains(&Action::from("METRIC")));
        assert!(actions.insert(Action::from("METRIC")));
        assert!(!actions.insert(Action::from("METRIC")));
        assert!(!actions.insert(Action::error()));
    }

    #[test]
    fn permissive_set_accepts_everything() {
        // ---
        let mut actions = ActionSet::any();

        assert!(actions.contains(&Action::from("anything")));
        assert!(!actions.insert(Action::from("LOG")));
        assert_eq!(actions.iter().count(), 0);
    }

    #[test]
    fn extend_adds_new_actions() {
        // ---
        let mut actions = ActionSet::empty();
        actions.extend([Action::from("A"), Action::from("B"), Action::from("A")]);

        assert_eq!(actions.iter().count(), 2);
        assert!(!actions.contains(&Action::log()));
    }

    #[test]
    fn action_serializes_as_plain_string() {
        // ---
        let json = serde_json::to_string(&Action::log()).unwrap();
        assert_eq!(json, "\"LOG\"");

        let back: Action = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(back, Action::error());
    }
}
