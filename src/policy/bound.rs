/*!
 * Bound Policy
 * A policy bound to exactly one model for the span of one check
 */

use super::def::Policy;
use crate::types::{Action, PolicyCheck};
use std::sync::Arc;

/// Immutable binding of one model to its rule table.
///
/// Constructed fresh for every check and dropped when the check
/// completes; never cached and never shared across requests.
pub struct BoundPolicy<'m, M: 'static, C: 'static> {
    model: &'m M,
    policy: Arc<Policy<M, C>>,
}

impl<'m, M: 'static, C: 'static> BoundPolicy<'m, M, C> {
    pub(crate) fn new(model: &'m M, policy: Arc<Policy<M, C>>) -> Self {
        Self { model, policy }
    }

    /// The bound model
    pub fn model(&self) -> &M {
        self.model
    }
}

impl<M: 'static, C: 'static> PolicyCheck<C> for BoundPolicy<'_, M, C> {
    fn can(&self, action: &Action, context: Option<&C>) -> bool {
        self.policy.can(self.model, action, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        author: u32,
    }

    fn note_policy() -> Arc<Policy<Note, u32>> {
        Arc::new(
            Policy::builder()
                .allow(["edit"], |note: &Note, ctx: Option<&u32>| {
                    ctx.map_or(false, |author| *author == note.author)
                })
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn test_model_accessor() {
        let policy = note_policy();
        let note = Note { author: 7 };
        let bound = policy.bind(&note);
        assert_eq!(bound.model().author, 7);
    }

    #[test]
    fn test_check_through_trait() {
        let policy = note_policy();
        let note = Note { author: 7 };
        let bound = policy.bind(&note);

        assert!(bound.can(&Action::from("edit"), Some(&7)));
        assert!(!bound.can(&Action::from("edit"), Some(&8)));
        assert!(bound.cannot(&Action::from("edit"), Some(&8)));
        assert!(!bound.can(&Action::from("edit"), None));
    }

    #[test]
    fn test_unregistered_action_denied() {
        let policy = note_policy();
        let note = Note { author: 7 };
        let bound = policy.bind(&note);

        assert!(!bound.can(&Action::from("delete"), Some(&7)));
        assert!(bound.cannot(&Action::from("delete"), Some(&7)));
    }
}
