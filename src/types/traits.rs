/*!
 * Authorization Traits
 * Interfaces between policies, the gate, and the request layer
 */

use super::core::Action;

/// Object-safe view of a policy bound to one model
pub trait PolicyCheck<C> {
    /// Whether the action is permitted given the context
    fn can(&self, action: &Action, context: Option<&C>) -> bool;

    /// Exact negation of [`PolicyCheck::can`] over the same arguments
    fn cannot(&self, action: &Action, context: Option<&C>) -> bool {
        !self.can(action, context)
    }
}

/// Source of the acting subject, provided by the request layer
pub trait SubjectSource: Send + Sync {
    type Subject;

    /// The current acting subject, if any
    fn current_subject(&self) -> Option<&Self::Subject>;

    /// Whether an acting subject is present
    fn is_authenticated(&self) -> bool {
        self.current_subject().is_some()
    }
}

/// In-memory source for tests and single-subject applications
impl<S: Send + Sync> SubjectSource for Option<S> {
    type Subject = S;

    fn current_subject(&self) -> Option<&S> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_subject_source() {
        let signed_in: Option<u32> = Some(7);
        assert_eq!(signed_in.current_subject(), Some(&7));
        assert!(signed_in.is_authenticated());

        let signed_out: Option<u32> = None;
        assert_eq!(signed_out.current_subject(), None);
        assert!(!signed_out.is_authenticated());
    }
}
