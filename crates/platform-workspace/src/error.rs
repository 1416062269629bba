//! Error types for workspace domain operations
//!
//! This module defines the errors raised by aggregate mutations when a
//! domain rule would be violated.

use thiserror::Error;

use crate::roles::WorkspaceRole;

/// Workspace domain error types.
///
/// These errors cover violations of the membership invariants enforced by
/// the [`Workspace`](crate::Workspace) aggregate. They are business-rule
/// failures, reported to the caller and never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    /// The role may not be granted through membership management
    #[error("Role '{0}' cannot be granted to a member")]
    RoleNotGrantable(WorkspaceRole),

    /// The operation would remove or re-role the workspace owner
    #[error("The workspace owner cannot be removed or re-roled")]
    OwnerImmutable,

    /// The target user has no membership in this workspace
    #[error("User is not a member of this workspace")]
    MemberNotFound,
}

/// Result type for workspace domain operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
