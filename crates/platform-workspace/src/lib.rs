//! # Platform Workspace Management
//!
//! This crate provides workspace membership and invitation models for the
//! Relay platform, shared across Verity, NoteMan, and ShipCheck applications.
//!
//! ## Overview
//!
//! The platform-workspace crate handles:
//! - **Workspaces**: Named collaborative containers owning a membership list
//! - **Memberships**: User-workspace relationships with role and status
//! - **Roles**: Hierarchical role-based access control (Owner/Admin/Editor/Viewer)
//! - **Invitations**: Token-addressed, time-bounded offers to join a workspace
//!
//! ## Architecture
//!
//! ```text
//! User
//!   ├─ Membership ─→ Workspace
//!   │                   └─ owner membership (exactly one, seeded at creation)
//!   └─ WorkspaceInvitation (Pending → Accepted | Declined | Expired)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use platform_workspace::{InvitedIdentity, Workspace, WorkspaceInvitation, WorkspaceRole};
//! use uuid::Uuid;
//!
//! // Create a workspace; the owner membership is seeded automatically
//! let owner_id = Uuid::now_v7();
//! let mut workspace = Workspace::new("Engineering", owner_id);
//!
//! // Add a member
//! let user_id = Uuid::now_v7();
//! workspace.add_member(user_id, WorkspaceRole::Editor).unwrap();
//!
//! // Invite someone by email
//! let invitation = WorkspaceInvitation::new(
//!     workspace.id,
//!     owner_id,
//!     InvitedIdentity::Email("dev@example.com".into()),
//!     WorkspaceRole::Viewer,
//! ).unwrap();
//! ```
//!
//! ## Cross-App Integration
//!
//! This crate is designed to work with:
//! - `platform-sharing`: Per-resource view/edit permission lists
//! - `platform-collab`: Service orchestration over these models
//!
//! Authentication is out of scope: callers supply an already-validated
//! user id.
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod error;
pub mod invitation;
pub mod membership;
pub mod roles;
pub mod workspace;

// Re-export main types for convenience
pub use error::{WorkspaceError, WorkspaceResult};
pub use invitation::{
    InvitationStatus, InvitedIdentity, WorkspaceInvitation, INVITATION_TTL_DAYS,
};
pub use membership::{Membership, MembershipStatus};
pub use roles::WorkspaceRole;
pub use workspace::{Workspace, WorkspaceSummary};
