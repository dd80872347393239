/*!
 * Authorization Gate
 * The can/cannot/authorize protocol called from request handlers
 */

use crate::audit::{AuditEvent, AuditLog};
use crate::registry::PolicyRegistry;
use crate::types::{Action, AuthError, AuthResult, SubjectSource};
use log::debug;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Request-facing authorization checks over a shared policy registry.
///
/// Each check is a single synchronous evaluation: resolve the object's
/// policy, evaluate the named predicate with the current subject as the
/// default context, and return the verdict. Objects whose type registers
/// no policy are unrestricted by design.
pub struct Gate<C: 'static, S> {
    registry: Arc<PolicyRegistry<C>>,
    subjects: S,
    audit: Option<Arc<AuditLog>>,
}

impl<C, S> Gate<C, S>
where
    C: 'static,
    S: SubjectSource<Subject = C>,
{
    pub fn new(registry: Arc<PolicyRegistry<C>>, subjects: S) -> Self {
        Self {
            registry,
            subjects,
            audit: None,
        }
    }

    /// Record every verdict into the given audit log
    pub fn with_audit(mut self, audit: Arc<AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// The subject source backing this gate
    pub fn subjects(&self) -> &S {
        &self.subjects
    }

    /// Whether an acting subject is present
    pub fn is_authenticated(&self) -> bool {
        self.subjects.is_authenticated()
    }

    /// Error with [`AuthError::AuthenticationRequired`] unless an acting
    /// subject is present
    pub fn authenticate(&self) -> AuthResult<()> {
        if self.subjects.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::AuthenticationRequired)
        }
    }

    /// Whether the current subject may perform the action on the object
    pub fn can<O: Any>(&self, action: impl Into<Action>, object: &O) -> bool {
        self.evaluate::<O>(&action.into(), object, None)
    }

    /// [`Gate::can`] with an explicit context instead of the current subject
    pub fn can_with<O: Any>(&self, action: impl Into<Action>, object: &O, context: &C) -> bool {
        self.evaluate::<O>(&action.into(), object, Some(context))
    }

    /// [`Gate::can`] that runs the closure when permission is granted
    pub fn can_then<O: Any>(
        &self,
        action: impl Into<Action>,
        object: &O,
        granted: impl FnOnce(),
    ) -> bool {
        let allowed = self.evaluate::<O>(&action.into(), object, None);
        if allowed {
            granted();
        }
        allowed
    }

    /// Exact negation of [`Gate::can`] over the same resolution path
    pub fn cannot<O: Any>(&self, action: impl Into<Action>, object: &O) -> bool {
        !self.evaluate::<O>(&action.into(), object, None)
    }

    /// [`Gate::cannot`] with an explicit context
    pub fn cannot_with<O: Any>(&self, action: impl Into<Action>, object: &O, context: &C) -> bool {
        !self.evaluate::<O>(&action.into(), object, Some(context))
    }

    /// [`Gate::cannot`] that runs the closure when permission is denied
    pub fn cannot_then<O: Any>(
        &self,
        action: impl Into<Action>,
        object: &O,
        denied: impl FnOnce(),
    ) -> bool {
        let blocked = !self.evaluate::<O>(&action.into(), object, None);
        if blocked {
            denied();
        }
        blocked
    }

    /// Pass through when permitted; otherwise fail with
    /// [`AuthError::AuthenticationRequired`] when no subject is present,
    /// [`AuthError::Unauthorized`] when one is.
    pub fn authorize<O: Any>(&self, action: impl Into<Action>, object: &O) -> AuthResult<()> {
        let action = action.into();
        if self.evaluate::<O>(&action, object, None) {
            return Ok(());
        }
        Err(self.denial::<O>(action))
    }

    /// [`Gate::authorize`] with an explicit context
    pub fn authorize_with<O: Any>(
        &self,
        action: impl Into<Action>,
        object: &O,
        context: &C,
    ) -> AuthResult<()> {
        let action = action.into();
        if self.evaluate::<O>(&action, object, Some(context)) {
            return Ok(());
        }
        Err(self.denial::<O>(action))
    }

    fn denial<O>(&self, action: Action) -> AuthError {
        if self.subjects.is_authenticated() {
            AuthError::Unauthorized {
                action,
                object_type: type_name::<O>().to_string(),
            }
        } else {
            AuthError::AuthenticationRequired
        }
    }

    /// One check: resolve, evaluate, record
    fn evaluate<O: Any>(&self, action: &Action, object: &O, context: Option<&C>) -> bool {
        let allowed = match self.registry.resolve(object) {
            None => {
                debug!(
                    "no policy registered for {}, allowing '{}'",
                    type_name::<O>(),
                    action
                );
                true
            }
            Some(policy) => {
                let context = context.or_else(|| self.subjects.current_subject());
                policy.can(action, context)
            }
        };

        if !allowed {
            debug!("denied '{}' on {}", action, type_name::<O>());
        }

        if let Some(ref audit) = self.audit {
            audit.record(AuditEvent::new(
                action.clone(),
                type_name::<O>(),
                allowed,
                self.subjects.is_authenticated(),
            ));
        }

        allowed
    }
}
