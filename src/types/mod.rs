/*!
 * Authorization Types Module
 * Core types and traits for authorization checks
 */

mod core;
mod traits;

pub use self::core::{Action, AuthError, AuthResult, DefinitionError, DefinitionResult};
pub use self::traits::{PolicyCheck, SubjectSource};
