/*!
 * Gatekeeper Library
 * Convention-based authorization core: per-type policies, registry
 * resolution, and a can/cannot/authorize gate for request handlers
 */

pub mod audit;
pub mod gate;
pub mod policy;
pub mod registry;
pub mod types;

// Re-exports
pub use audit::{AuditEvent, AuditLog, AuditSeverity, AuditStats};
pub use gate::Gate;
pub use policy::{BoundPolicy, Policy, PolicyBuilder, Predicate};
pub use registry::{PolicyRegistry, PolicySupport};
pub use types::{
    Action, AuthError, AuthResult, DefinitionError, DefinitionResult, PolicyCheck, SubjectSource,
};
