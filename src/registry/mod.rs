/*!
 * Policy Registry
 * Resolves a domain object to its policy by runtime type
 */

use crate::policy::Policy;
use crate::types::PolicyCheck;
use ahash::RandomState;
use log::debug;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Type-erased constructor binding an object to its policy
trait ErasedBinder<C>: Send + Sync {
    fn bind<'a>(&self, object: &'a dyn Any) -> Option<Box<dyn PolicyCheck<C> + 'a>>;
}

struct TypedBinder<M: 'static, C: 'static> {
    policy: Arc<Policy<M, C>>,
}

impl<M: Any, C: 'static> ErasedBinder<C> for TypedBinder<M, C> {
    fn bind<'a>(&self, object: &'a dyn Any) -> Option<Box<dyn PolicyCheck<C> + 'a>> {
        let model = object.downcast_ref::<M>()?;
        Some(Box::new(Arc::clone(&self.policy).bind(model)))
    }
}

struct Entry<C: 'static> {
    type_name: &'static str,
    binder: Box<dyn ErasedBinder<C>>,
}

/// Maps a model's runtime type to its policy.
///
/// Populated during single-threaded startup, then shared read-only
/// (typically behind an `Arc`) for the life of the process; mutation
/// requires `&mut`, so post-startup registration is structurally
/// prevented.
pub struct PolicyRegistry<C: 'static> {
    entries: HashMap<TypeId, Entry<C>, RandomState>,
}

impl<C: 'static> PolicyRegistry<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }

    /// Associate a model type with its policy.
    ///
    /// Registering the same type again replaces the earlier policy.
    pub fn register<M: Any>(&mut self, policy: Policy<M, C>) {
        let type_name = std::any::type_name::<M>();
        debug!("registering policy for {}", type_name);
        self.entries.insert(
            TypeId::of::<M>(),
            Entry {
                type_name,
                binder: Box::new(TypedBinder {
                    policy: Arc::new(policy),
                }),
            },
        );
    }

    /// Resolve an object to a policy bound to it.
    ///
    /// `None` means the object's type declares no restrictions; this is
    /// an expected outcome, not an error. Only the lookup miss is
    /// converted to `None` — a panic inside a predicate propagates
    /// unchanged.
    pub fn resolve<'a>(&'a self, object: &'a dyn Any) -> Option<Box<dyn PolicyCheck<C> + 'a>> {
        let entry = self.entries.get(&object.type_id())?;
        entry.binder.bind(object)
    }

    /// Whether a policy is registered for the model type
    pub fn contains<M: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<M>())
    }

    /// Recorded type name for a registered model type
    pub fn type_name_of<M: Any>(&self) -> Option<&'static str> {
        self.entries.get(&TypeId::of::<M>()).map(|e| e.type_name)
    }

    /// Number of registered policies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: 'static> Default for PolicyRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability adopted by every object: resolve my own policy.
///
/// Blanket-implemented so any `'static` type can ask for its policy;
/// types without a registered policy get `None` back.
pub trait PolicySupport: Any + Sized {
    /// The object's bound policy, or `None` when its type registers none
    fn to_policy<'a, C: 'static>(
        &'a self,
        registry: &'a PolicyRegistry<C>,
    ) -> Option<Box<dyn PolicyCheck<C> + 'a>> {
        registry.resolve(self)
    }
}

impl<T: Any + Sized> PolicySupport for T {}
