//! Transport builder.
//!
//! Provides a fluent API for assembling a [`TransportConfig`] and constructing
//! a [`Transport`]. Action names are validated once, at `build()`.

use crate::{Action, ActionSet, OncePolicy, Result, Transport, TransportConfig};

/// Builder for [`Transport`] instances.
///
/// # Examples
///
/// ## Starter actions plus a host-defined one
/// ```
/// use listener_transport::{Transport, TransportBuilder};
///
/// let transport: Transport<String> = TransportBuilder::new()
///     .action("AUDIT")
///     .build()?;
///
/// assert!(transport.actions().iter().any(|a| a.as_str() == "AUDIT"));
/// assert!(transport.actions().iter().any(|a| a.as_str() == "LOG"));
/// # Ok::<(), listener_transport::Error>(())
/// ```
///
/// ## Only the actions listed, one-shot listeners remove only themselves
/// ```
/// use listener_transport::{OncePolicy, Transport, TransportBuilder};
///
/// let transport: Transport<u32> = TransportBuilder::new()
///     .without_starter_actions()
///     .actions(["TICK", "TOCK"])
///     .once_policy(OncePolicy::RemoveSelf)
///     .build()?;
///
/// assert!(!transport.actions().contains(&"LOG".into()));
/// assert_eq!(transport.once_policy(), OncePolicy::RemoveSelf);
/// # Ok::<(), listener_transport::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TransportBuilder {
    actions: ActionSet,
    extra_actions: Vec<String>,
    allow_any_action: bool,
    once_policy: OncePolicy,
}

impl TransportBuilder {
    /// Create a builder seeded with the default configuration.
    pub fn new() -> Self {
        Self::from_config(TransportConfig::default())
    }

    /// Create a builder seeded with an existing configuration.
    pub fn from_config(config: TransportConfig) -> Self {
        Self {
            actions: config.actions,
            extra_actions: Vec::new(),
            allow_any_action: false,
            once_policy: config.once_policy,
        }
    }

    /// Recognize an additional action name.
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.extra_actions.push(name.into());
        self
    }

    /// Recognize several additional action names.
    pub fn actions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_actions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Start from an empty action set instead of the starter `{LOG, ERROR}`.
    ///
    /// Names added with [`action`](Self::action) or
    /// [`actions`](Self::actions) are kept.
    pub fn without_starter_actions(mut self) -> Self {
        self.actions = ActionSet::empty();
        self
    }

    /// Make the action set permissive: every name counts as recognized and
    /// none is recorded.
    pub fn allow_any_action(mut self) -> Self {
        self.allow_any_action = true;
        self
    }

    /// Set the one-shot cleanup policy.
    ///
    /// Default: [`OncePolicy::ClearAction`].
    pub fn once_policy(mut self, policy: OncePolicy) -> Self {
        self.once_policy = policy;
        self
    }

    /// Validate and assemble the configuration without building a transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`](crate::Error::InvalidAction) if any
    /// added action name is empty or whitespace.
    pub fn into_config(self) -> Result<TransportConfig> {
        // ---
        let mut actions = self.actions;
        for name in &self.extra_actions {
            actions.insert(Action::parse(name)?);
        }

        if self.allow_any_action {
            actions = ActionSet::any();
        }

        Ok(TransportConfig {
            actions,
            once_policy: self.once_policy,
        })
    }

    /// Build the transport (consumes self).
    ///
    /// # Errors
    ///
    /// Same as [`into_config`](Self::into_config).
    pub fn build<D>(self) -> Result<Transport<D>> {
        Ok(Transport::with_config(self.into_config()?))
    }
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
