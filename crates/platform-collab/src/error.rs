//! Error types for collaboration services
//!
//! This module defines all caller-facing errors produced by the workspace
//! and invitation services. Every variant except `Storage` is a business
//! rule violation; none are retried automatically.

use thiserror::Error;

use platform_workspace::WorkspaceError;

/// Collaboration service error types.
///
/// These errors cover authorization failures, state-machine violations, and
/// uniqueness conflicts across workspace and invitation operations.
#[derive(Debug, Error)]
pub enum CollabError {
    /// Workspace, invitation, or user does not resolve
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Requester lacks the required role for the operation
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    /// Duplicate workspace name, duplicate pending invitation, or target
    /// already a member
    #[error("Conflict: {0}")]
    Conflict(&'static str),

    /// Invalid input, such as granting the Owner role
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation on an invitation that is no longer pending
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// Invitation past its expiry; surfaced distinctly so callers can offer
    /// a fresh invite
    #[error("Invitation has expired")]
    Expired,

    /// Persistence failure reported by a store
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for collaboration service operations.
pub type CollabResult<T> = Result<T, CollabError>;

impl CollabError {
    /// Check if this error should be logged at error level.
    ///
    /// Business-rule violations are expected outcomes; only storage
    /// failures indicate something is wrong with the deployment.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, CollabError::Storage(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CollabError::NotFound(_) => "NOT_FOUND",
            CollabError::Forbidden(_) => "FORBIDDEN",
            CollabError::Conflict(_) => "CONFLICT",
            CollabError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CollabError::InvalidState(_) => "INVALID_STATE",
            CollabError::Expired => "EXPIRED",
            CollabError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<WorkspaceError> for CollabError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::RoleNotGrantable(_) => CollabError::InvalidArgument(err.to_string()),
            WorkspaceError::OwnerImmutable => {
                CollabError::Forbidden("the workspace owner cannot be removed or re-roled")
            }
            WorkspaceError::MemberNotFound => CollabError::NotFound("member"),
        }
    }
}
