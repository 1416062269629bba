//! In-memory store implementations
//!
//! This backend is suitable for single-process applications and testing.
//! Each store keeps its records behind a single `RwLock`, so the uniqueness
//! and compare-and-set contracts of [`crate::store`] hold under one write
//! guard; distributed deployments need a persistent backend that realizes
//! the same contracts with a version field or unique index.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CollabError, CollabResult};
use crate::store::{InvitationStore, UserDirectory, UserRecord, WorkspaceStore};
use platform_workspace::{InvitationStatus, Workspace, WorkspaceInvitation};

/// In-memory workspace store.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspaceStore {
    workspaces: Arc<RwLock<HashMap<Uuid, Workspace>>>,
}

impl MemoryWorkspaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn create(&self, workspace: Workspace) -> CollabResult<Workspace> {
        let mut workspaces = self.workspaces.write().await;
        let duplicate = workspaces
            .values()
            .any(|w| w.owner_id == workspace.owner_id && w.name == workspace.name);
        if duplicate {
            return Err(CollabError::Conflict(
                "a workspace with this name already exists for this owner",
            ));
        }
        workspaces.insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn get(&self, id: Uuid) -> CollabResult<Option<Workspace>> {
        Ok(self.workspaces.read().await.get(&id).cloned())
    }

    async fn update(&self, workspace: Workspace) -> CollabResult<Workspace> {
        let mut workspaces = self.workspaces.write().await;
        if !workspaces.contains_key(&workspace.id) {
            return Err(CollabError::NotFound("workspace"));
        }
        let duplicate = workspaces.values().any(|w| {
            w.id != workspace.id && w.owner_id == workspace.owner_id && w.name == workspace.name
        });
        if duplicate {
            return Err(CollabError::Conflict(
                "a workspace with this name already exists for this owner",
            ));
        }
        workspaces.insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn delete(&self, id: Uuid) -> CollabResult<bool> {
        Ok(self.workspaces.write().await.remove(&id).is_some())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> CollabResult<Vec<Workspace>> {
        Ok(self
            .workspaces
            .read()
            .await
            .values()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

/// In-memory invitation store.
#[derive(Debug, Clone, Default)]
pub struct MemoryInvitationStore {
    invitations: Arc<RwLock<HashMap<Uuid, WorkspaceInvitation>>>,
}

impl MemoryInvitationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvitationStore for MemoryInvitationStore {
    async fn create(&self, invitation: WorkspaceInvitation) -> CollabResult<WorkspaceInvitation> {
        let mut invitations = self.invitations.write().await;
        if invitations.values().any(|i| i.token == invitation.token) {
            return Err(CollabError::Conflict("invitation token already in use"));
        }
        invitations.insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn get(&self, id: Uuid) -> CollabResult<Option<WorkspaceInvitation>> {
        Ok(self.invitations.read().await.get(&id).cloned())
    }

    async fn get_by_token(&self, token: &str) -> CollabResult<Option<WorkspaceInvitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .find(|i| i.token == token)
            .cloned())
    }

    async fn update(&self, invitation: WorkspaceInvitation) -> CollabResult<WorkspaceInvitation> {
        let mut invitations = self.invitations.write().await;
        if !invitations.contains_key(&invitation.id) {
            return Err(CollabError::NotFound("invitation"));
        }
        invitations.insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn update_if_pending(&self, invitation: WorkspaceInvitation) -> CollabResult<bool> {
        let mut invitations = self.invitations.write().await;
        match invitations.get(&invitation.id) {
            Some(stored) if stored.status == InvitationStatus::Pending => {
                invitations.insert(invitation.id, invitation);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(CollabError::NotFound("invitation")),
        }
    }

    async fn delete(&self, id: Uuid) -> CollabResult<bool> {
        Ok(self.invitations.write().await.remove(&id).is_some())
    }

    async fn delete_for_workspace(&self, workspace_id: Uuid) -> CollabResult<usize> {
        let mut invitations = self.invitations.write().await;
        let before = invitations.len();
        invitations.retain(|_, i| i.workspace_id != workspace_id);
        Ok(before - invitations.len())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
    ) -> CollabResult<Vec<WorkspaceInvitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .filter(|i| i.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn find_pending_for_identity(
        &self,
        workspace_id: Uuid,
        user: &UserRecord,
        as_of: DateTime<Utc>,
    ) -> CollabResult<Option<WorkspaceInvitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .find(|i| {
                i.workspace_id == workspace_id
                    && i.is_pending(as_of)
                    && i.matches_identity(user.id, Some(&user.email), Some(&user.username))
            })
            .cloned())
    }

    async fn list_pending_for_user(
        &self,
        user: &UserRecord,
        as_of: DateTime<Utc>,
    ) -> CollabResult<Vec<WorkspaceInvitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .filter(|i| {
                i.is_pending(as_of)
                    && i.matches_identity(user.id, Some(&user.email), Some(&user.username))
            })
            .cloned()
            .collect())
    }

    async fn list_lapsed(&self, as_of: DateTime<Utc>) -> CollabResult<Vec<WorkspaceInvitation>> {
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .filter(|i| i.status == InvitationStatus::Pending && i.expires_at <= as_of)
            .cloned()
            .collect())
    }
}

/// In-memory user directory.
///
/// Users are seeded by the embedding application (or a test fixture); the
/// collaboration engine itself only reads.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the directory.
    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> CollabResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> CollabResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> CollabResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
