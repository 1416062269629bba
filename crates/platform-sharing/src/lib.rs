//! # Platform Sharing
//!
//! This crate provides per-resource sharing and authorization for the Relay
//! platform, shared across Verity, NoteMan, and ShipCheck applications.
//!
//! ## Overview
//!
//! The platform-sharing crate handles:
//! - **Shared permission lists**: Per-resource view/edit ACLs, independent
//!   of workspace roles
//! - **Capability evaluation**: One pure function answering what a user may
//!   do with a task or note
//! - **Actions**: The view/edit/delete action vocabulary
//!
//! ## Precedence
//!
//! Capability evaluation applies a fixed precedence, first match wins:
//!
//! ```text
//! owner ─→ full access
//! personal resource (no workspace) ─→ deny
//! assigned user (tasks) ─→ view + edit
//! shared permission grant ─→ view, edit if granted
//! otherwise ─→ deny
//! ```
//!
//! Delete never comes from sharing; it is the owner's alone.
//!
//! ## Usage
//!
//! Task and note entities implement [`SharedResource`] and call
//! [`capabilities`] (or the [`can_view`]/[`can_edit`]/[`can_delete`]
//! shortcuts) before any mutation.
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod actions;
pub mod permissions;
pub mod resource;

// Re-export main types for convenience
pub use actions::Action;
pub use permissions::SharedPermissions;
pub use resource::{can_delete, can_edit, can_view, capabilities, Capabilities, SharedResource};
