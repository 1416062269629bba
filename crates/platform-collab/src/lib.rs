//! # Platform Collaboration Services
//!
//! This crate orchestrates workspace collaboration for the Relay platform,
//! shared across Verity, NoteMan, and ShipCheck applications.
//!
//! ## Overview
//!
//! The platform-collab crate handles:
//! - **Workspace service**: Workspace lifecycle and membership management
//!   with authorization gates on every mutation
//! - **Invitation service**: The full invitation lifecycle: send, accept,
//!   decline, cancel, resend, and the expiry sweep
//! - **Stores**: Abstract persistence and user-directory seams, with an
//!   in-memory backend for single-process use and testing
//!
//! ## Architecture
//!
//! ```text
//! caller (authenticated user id)
//!   ├─ WorkspaceService ──→ WorkspaceStore
//!   └─ InvitationService ─→ InvitationStore (compare-and-set transitions)
//!                         └→ UserDirectory (identity resolution)
//! ```
//!
//! The engine runs synchronously within whatever request context invokes
//! it; race safety across service instances comes from the store
//! contracts, not in-process locks. See
//! [`InvitationStore::update_if_pending`] for the serialization point.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use platform_collab::{
//!     InvitationService, MemoryInvitationStore, MemoryUserDirectory, MemoryWorkspaceStore,
//!     UserRecord, WorkspaceService,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspaces = Arc::new(MemoryWorkspaceStore::new());
//! let invitations = Arc::new(MemoryInvitationStore::new());
//! let users = Arc::new(MemoryUserDirectory::new());
//!
//! let owner_id = Uuid::now_v7();
//! users.insert(UserRecord::new(owner_id, "owner@example.com", "owner")).await;
//!
//! let workspace_service =
//!     WorkspaceService::new(workspaces.clone(), invitations.clone(), users.clone());
//! let invitation_service = InvitationService::new(workspaces, invitations, users);
//!
//! let workspace = workspace_service
//!     .create_workspace("Engineering", None, owner_id)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-App Integration
//!
//! This crate is designed to work with:
//! - `platform-workspace`: The domain models it orchestrates
//! - `platform-sharing`: Capability evaluation for tasks and notes,
//!   re-exported here for convenience
//!
//! Authentication is out of scope: callers supply an already-validated
//! user id.
//!
//! ## Feature Flags
//!
//! - `memory`: In-memory store implementations (enabled by default)

pub mod error;
pub mod invitation_service;
#[cfg(feature = "memory")]
pub mod memory;
pub mod store;
pub mod workspace_service;

// Re-export main types for convenience
pub use error::{CollabError, CollabResult};
pub use invitation_service::InvitationService;
#[cfg(feature = "memory")]
pub use memory::{MemoryInvitationStore, MemoryUserDirectory, MemoryWorkspaceStore};
pub use store::{InvitationStore, UserDirectory, UserRecord, WorkspaceStore};
pub use workspace_service::WorkspaceService;

// Resource authorization predicates for task/note services
pub use platform_sharing::{
    can_delete, can_edit, can_view, capabilities, Capabilities, SharedPermissions, SharedResource,
};
