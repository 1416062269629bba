//! Workspace invitation models
//!
//! This module provides the invitation entity: a token-addressed,
//! time-bounded offer to join a workspace with a given role. An invitation
//! is a one-way state machine; once it leaves `Pending` it never returns,
//! except through an explicit resend which regenerates the token and expiry.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::roles::WorkspaceRole;

/// How long an invitation stays valid after creation or resend.
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Length of the opaque invitation token.
const TOKEN_LENGTH: usize = 32;

/// Lifecycle status of a workspace invitation.
///
/// `Pending` is the only non-terminal state:
///
/// ```text
/// Pending ─→ Accepted
///        ─→ Declined
///        ─→ Expired
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Awaiting a response
    Pending,

    /// Accepted; the invitee joined the workspace
    Accepted,

    /// Declined by the invitee
    Declined,

    /// Lapsed past its expiry without a response
    Expired,
}

impl InvitationStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }
}

/// The identity an invitation is addressed to.
///
/// An invitation always targets exactly one of: a known user id, an email
/// address, or a username. Email and username targets are resolved to a
/// concrete user when the invitation is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvitedIdentity {
    /// Invite by email address
    Email(String),

    /// Invite by username
    Username(String),

    /// Invite a known user directly
    UserId(Uuid),
}

/// A token-addressed, time-bounded offer to join a workspace.
///
/// The token is globally unique and opaque; it is the sole public identifier
/// for "accept by link" flows where the invitee is not logged in yet. The
/// granted role can never be Owner.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use chrono::Utc;
/// use platform_workspace::{InvitedIdentity, InvitationStatus, WorkspaceInvitation, WorkspaceRole};
///
/// let invitation = WorkspaceInvitation::new(
///     Uuid::now_v7(),
///     Uuid::now_v7(),
///     InvitedIdentity::Email("dev@example.com".into()),
///     WorkspaceRole::Editor,
/// ).unwrap();
///
/// assert_eq!(invitation.status, InvitationStatus::Pending);
/// assert!(invitation.is_pending(Utc::now()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInvitation {
    /// Unique invitation ID
    pub id: Uuid,

    /// Workspace the invitee would join
    pub workspace_id: Uuid,

    /// Who sent the invitation
    pub inviter_id: Uuid,

    /// Invited email address, if addressed by email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_email: Option<String>,

    /// Invited username, if addressed by username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_username: Option<String>,

    /// Resolved user ID; set at creation for direct invites, bound at
    /// accept time for email/username invites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_user_id: Option<Uuid>,

    /// Role granted on acceptance (never Owner)
    pub role: WorkspaceRole,

    /// Opaque, globally unique token
    pub token: String,

    /// Current lifecycle status
    pub status: InvitationStatus,

    /// When the invitation lapses
    pub expires_at: DateTime<Utc>,

    /// When the invitation was created (reset by resend)
    pub created_at: DateTime<Utc>,

    /// When the invitee responded; unset for expiry by sweep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl WorkspaceInvitation {
    /// Creates a new pending invitation.
    ///
    /// The invitation is created with:
    /// - A newly generated UUID v7 ID
    /// - A freshly generated opaque token
    /// - Pending status
    /// - Expiry [`INVITATION_TTL_DAYS`] days from now
    ///
    /// # Arguments
    ///
    /// * `workspace_id` - The workspace to join
    /// * `inviter_id` - The user sending the invitation
    /// * `identity` - Who the invitation is addressed to
    /// * `role` - The role granted on acceptance; must not be Owner
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::RoleNotGrantable`] if `role` is Owner,
    /// regardless of the inviter's privilege.
    pub fn new(
        workspace_id: Uuid,
        inviter_id: Uuid,
        identity: InvitedIdentity,
        role: WorkspaceRole,
    ) -> WorkspaceResult<Self> {
        if !role.is_grantable() {
            return Err(WorkspaceError::RoleNotGrantable(role));
        }

        let (invited_email, invited_username, invited_user_id) = match identity {
            InvitedIdentity::Email(email) => (Some(email), None, None),
            InvitedIdentity::Username(username) => (None, Some(username), None),
            InvitedIdentity::UserId(user_id) => (None, None, Some(user_id)),
        };

        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            workspace_id,
            inviter_id,
            invited_email,
            invited_username,
            invited_user_id,
            role,
            token: generate_token(),
            status: InvitationStatus::Pending,
            expires_at: now + Duration::days(INVITATION_TTL_DAYS),
            created_at: now,
            responded_at: None,
        })
    }

    /// Check if the invitation can still be responded to at `at`.
    ///
    /// An invitation whose expiry equals the current instant is already
    /// expired.
    ///
    /// # Returns
    ///
    /// `true` iff status is Pending and `at` is strictly before expiry
    pub fn is_pending(&self, at: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending && at < self.expires_at
    }

    /// Check if the invitation has lapsed at `at`.
    ///
    /// Covers both the swept `Expired` status and a still-Pending record
    /// whose expiry has passed but which no sweep has visited yet.
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        match self.status {
            InvitationStatus::Expired => true,
            InvitationStatus::Pending => at >= self.expires_at,
            _ => false,
        }
    }

    /// Check if the invitation is addressed to the given identity.
    ///
    /// Resolution checks whichever target fields are set: a bound user id
    /// matches directly; email and username targets match the resolved
    /// directory record of the responding user. Email comparison is
    /// case-insensitive.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The responding user's id
    /// * `email` - The responding user's email, if known
    /// * `username` - The responding user's username, if known
    pub fn matches_identity(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        username: Option<&str>,
    ) -> bool {
        if self.invited_user_id == Some(user_id) {
            return true;
        }
        if let (Some(invited), Some(actual)) = (self.invited_email.as_deref(), email) {
            if invited.eq_ignore_ascii_case(actual) {
                return true;
            }
        }
        if let (Some(invited), Some(actual)) = (self.invited_username.as_deref(), username) {
            if invited == actual {
                return true;
            }
        }
        false
    }

    /// Bind the invitation to the user who claimed it.
    ///
    /// Accepting an email/username invitation claims it for the responding
    /// user; a previously bound user id is left untouched.
    pub fn claim(&mut self, user_id: Uuid) {
        if self.invited_user_id.is_none() {
            self.invited_user_id = Some(user_id);
        }
    }

    /// Transition to Accepted and record the response time.
    pub fn mark_accepted(&mut self, at: DateTime<Utc>) {
        self.status = InvitationStatus::Accepted;
        self.responded_at = Some(at);
    }

    /// Transition to Declined and record the response time.
    pub fn mark_declined(&mut self, at: DateTime<Utc>) {
        self.status = InvitationStatus::Declined;
        self.responded_at = Some(at);
    }

    /// Transition to Expired.
    ///
    /// Expiry is applied by a sweep, not by a response, so `responded_at`
    /// stays unset.
    pub fn mark_expired(&mut self) {
        self.status = InvitationStatus::Expired;
    }

    /// Reset the invitation for a resend.
    ///
    /// Generates a new unique token, restarts the expiry clock, and returns
    /// the status to Pending. The target identity and granted role are left
    /// unchanged.
    pub fn regenerate(&mut self) {
        let now = Utc::now();
        self.token = generate_token();
        self.created_at = now;
        self.expires_at = now + Duration::days(INVITATION_TTL_DAYS);
        self.status = InvitationStatus::Pending;
        self.responded_at = None;
    }
}

/// Generate an opaque alphanumeric invitation token.
fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
