/*!
 * Policy Definition
 * Rule tables declared at startup and frozen afterwards
 */

use super::bound::BoundPolicy;
use crate::types::{Action, DefinitionError, DefinitionResult};
use ahash::RandomState;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Permission predicate: model plus optional context to verdict
pub type Predicate<M, C> = Arc<dyn Fn(&M, Option<&C>) -> bool + Send + Sync>;

/// Rule table for one model type
///
/// Maps action tokens to predicates. Populated through [`PolicyBuilder`]
/// during startup and immutable afterwards; concurrent checks read it
/// freely without synchronization.
pub struct Policy<M: 'static, C: 'static> {
    rules: HashMap<Action, Predicate<M, C>, RandomState>,
}

impl<M: 'static, C: 'static> Policy<M, C> {
    /// Start a declarative policy definition
    pub fn builder() -> PolicyBuilder<M, C> {
        PolicyBuilder {
            rules: HashMap::default(),
        }
    }

    /// Evaluate an action against a model.
    ///
    /// Default-deny: an action with no registered predicate is always
    /// denied, so a typo in an action name can never grant access.
    pub fn can(&self, model: &M, action: &Action, context: Option<&C>) -> bool {
        match self.rules.get(action) {
            Some(predicate) => predicate(model, context),
            None => false,
        }
    }

    /// Exact negation of [`Policy::can`] over the same arguments
    pub fn cannot(&self, model: &M, action: &Action, context: Option<&C>) -> bool {
        !self.can(model, action, context)
    }

    /// Bind one model for the duration of a single check
    pub fn bind(self: Arc<Self>, model: &M) -> BoundPolicy<'_, M, C> {
        BoundPolicy::new(model, self)
    }

    /// Whether a predicate is registered under the action
    pub fn has_rule(&self, action: &Action) -> bool {
        self.rules.contains_key(action)
    }

    /// Registered action tokens
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.rules.keys()
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Declarative registration surface for [`Policy`]
pub struct PolicyBuilder<M: 'static, C: 'static> {
    rules: HashMap<Action, Predicate<M, C>, RandomState>,
}

impl<M: 'static, C: 'static> PolicyBuilder<M, C> {
    /// Register one predicate under one or more action tokens.
    ///
    /// Fails at definition time, never at check time: zero actions or a
    /// blank token is a configuration error and defines nothing.
    /// Registering an action twice replaces the earlier predicate.
    pub fn allow<I, A, F>(mut self, actions: I, predicate: F) -> DefinitionResult<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
        F: Fn(&M, Option<&C>) -> bool + Send + Sync + 'static,
    {
        let actions: Vec<Action> = actions.into_iter().map(Into::into).collect();
        if actions.is_empty() {
            return Err(DefinitionError::NoActions);
        }
        if actions.iter().any(Action::is_blank) {
            return Err(DefinitionError::BlankAction);
        }

        let predicate: Predicate<M, C> = Arc::new(predicate);
        for action in actions {
            debug!("registering predicate for action '{}'", action);
            self.rules.insert(action, Arc::clone(&predicate));
        }
        Ok(self)
    }

    /// Freeze the rule table
    pub fn build(self) -> Policy<M, C> {
        Policy { rules: self.rules }
    }
}

impl<M: 'static, C: 'static> Default for PolicyBuilder<M, C> {
    fn default() -> Self {
        Policy::builder()
    }
}
