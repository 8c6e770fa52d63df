//! Public transport configuration.
//!
//! Holds the two pieces of behavior a host may choose: which actions accept
//! listener registrations, and what a one-shot listener cleans up after it
//! fires. Built in code via the `with_*` methods or loaded from JSON.

use serde::Deserialize;

use crate::{Action, ActionSet, Error, Result};

/// Cleanup applied after a one-shot listener (see `Transport::once`) fires.
///
/// # Example
///
/// ```
/// use listener_transport::OncePolicy;
///
/// let policy: OncePolicy = serde_json::from_str("\"remove_self\"").unwrap();
/// assert_eq!(policy, OncePolicy::RemoveSelf);
/// assert_eq!(OncePolicy::default(), OncePolicy::ClearAction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OncePolicy {
    /// Delete the whole registry entry for the action once the one-shot
    /// listener has run, dropping every co-registered listener with it.
    ///
    /// This is the long-standing behavior and remains the default. A dispatch
    /// already in progress still reaches the listeners it had in hand.
    #[default]
    ClearAction,

    /// Remove only the one-shot registration; other listeners stay.
    RemoveSelf,
}

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportConfig {
    // ---
    /// Actions that accept listener registrations.
    ///
    /// Default: the starter set `{LOG, ERROR}`.
    pub actions: ActionSet,

    /// One-shot cleanup policy.
    ///
    /// Default: [`OncePolicy::ClearAction`].
    pub once_policy: OncePolicy,
}

impl TransportConfig {
    /// Replace the recognized action set.
    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    /// Recognize one more action.
    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.actions.insert(action.into());
        self
    }

    /// Set the one-shot cleanup policy.
    pub fn with_once_policy(mut self, policy: OncePolicy) -> Self {
        self.once_policy = policy;
        self
    }

    /// Load configuration from a JSON document.
    ///
    /// Every field is optional:
    ///
    /// ```
    /// use listener_transport::{Action, OncePolicy, TransportConfig};
    ///
    /// let config = TransportConfig::from_json(r#"{
    ///     "actions": ["LOG", "ERROR", "AUDIT"],
    ///     "once_policy": "remove_self"
    /// }"#)?;
    ///
    /// assert!(config.actions.contains(&Action::from("AUDIT")));
    /// assert_eq!(config.once_policy, OncePolicy::RemoveSelf);
    /// # Ok::<(), listener_transport::Error>(())
    /// ```
    ///
    /// `"allow_any_action": true` makes the action set permissive and ignores
    /// `actions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON or unknown fields, and
    /// [`Error::InvalidAction`] for blank action names.
    pub fn from_json(json: &str) -> Result<Self> {
        // ---
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

/// Wire shape of [`TransportConfig`]; names are validated on conversion.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    actions: Option<Vec<String>>,

    #[serde(default)]
    allow_any_action: bool,

    #[serde(default)]
    once_policy: OncePolicy,
}

impl TryFrom<RawConfig> for TransportConfig {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        // ---
        let actions = match (raw.allow_any_action, raw.actions) {
            (true, _) => ActionSet::any(),
            (false, Some(names)) => names
                .iter()
                .map(|name| Action::parse(name))
                .collect::<Result<ActionSet>>()?,
            (false, None) => ActionSet::starter(),
        };

        Ok(Self {
            actions,
            once_policy: raw.once_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn default_config_uses_starter_set_and_clear_action() {
        // ---
        let config = TransportConfig::default();

        assert_eq!(config.actions, ActionSet::starter());
        assert_eq!(config.once_policy, OncePolicy::ClearAction);
    }

    #[test]
    fn empty_json_yields_defaults() {
        // ---
        let config = TransportConfig::from_json("{}").unwrap();

        assert_eq!(config, TransportConfig::default());
    }

    #[test]
    fn explicit_action_list_replaces_starter_set() {
        // ---
        let config = TransportConfig::from_json(r#"{"actions": ["AUDIT"]}"#).unwrap();

        assert!(config.actions.contains(&Action::from("AUDIT")));
        assert!(!config.actions.contains(&Action::log()));
    }

    #[test]
    fn allow_any_action_wins_over_list() {
        // ---
        let config =
            TransportConfig::from_json(r#"{"actions": ["AUDIT"], "allow_any_action": true}"#)
                .unwrap();

        assert!(config.actions.is_any());
    }

    #[test]
    fn blank_action_name_is_rejected() {
        // ---
        let err = TransportConfig::from_json(r#"{"actions": ["LOG", " "]}"#).unwrap_err();

        assert!(matches!(err, Error::InvalidAction(_)));
    }

    #[test]
    fn unknown_field_is_a_config_error() {
        // ---
        let err = TransportConfig::from_json(r#"{"prioritize": true}"#).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn builder_methods_compose() {
        // ---
        let config = TransportConfig::default()
            .with_action("AUDIT")
            .with_once_policy(OncePolicy::RemoveSelf);

        assert!(config.actions.contains(&Action::from("AUDIT")));
        assert!(config.actions.contains(&Action::error()));
        assert_eq!(config.once_policy, OncePolicy::RemoveSelf);
    }
}
