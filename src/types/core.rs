/*!
 * Authorization Types
 * Action tokens and the error taxonomy for authorization checks
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for authorization checks
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for policy definition
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Authorization failures
///
/// `authorize` distinguishes "nobody is signed in" from "the signed-in
/// subject lacks permission" so callers can redirect to sign-in rather
/// than render a generic denial.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error")]
pub enum AuthError {
    /// Check denied while no acting subject is present
    #[error("authentication required")]
    AuthenticationRequired,

    /// Check denied for a present acting subject
    #[error("not authorized to perform '{action}' on {object_type}")]
    Unauthorized { action: Action, object_type: String },
}

/// Policy definition errors
///
/// Raised while a policy is being declared during startup; never reaches
/// a live check.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error")]
pub enum DefinitionError {
    #[error("at least one action must be given")]
    NoActions,

    #[error("action names must not be blank")]
    BlankAction,
}

/// Action being attempted on a target object
///
/// Any token is a valid action; an unregistered token simply never
/// resolves to a predicate and is denied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    /// Create a new action token
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_token() {
        let action = Action::from("edit");
        assert_eq!(action.as_str(), "edit");
        assert_eq!(action.to_string(), "edit");
        assert!(!action.is_blank());
        assert!(Action::from("  ").is_blank());
    }

    #[test]
    fn test_action_serde_transparent() {
        let action = Action::from("publish");
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"publish\"");

        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_auth_error_serde_tag() {
        let err = AuthError::Unauthorized {
            action: Action::from("edit"),
            object_type: "Document".to_string(),
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["error"], "unauthorized");
        assert_eq!(value["action"], "edit");

        let value = serde_json::to_value(AuthError::AuthenticationRequired).unwrap();
        assert_eq!(value["error"], "authentication_required");
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::Unauthorized {
            action: Action::from("edit"),
            object_type: "Document".to_string(),
        };
        assert_eq!(err.to_string(), "not authorized to perform 'edit' on Document");
        assert_eq!(
            DefinitionError::NoActions.to_string(),
            "at least one action must be given"
        );
    }
}
