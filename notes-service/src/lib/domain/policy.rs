//! Authorization rules shared by the note and team services.
//!
//! Every check is a pure function over already-loaded records, so services
//! decide access before issuing any write.

use thiserror::Error;

use crate::team::models::Membership;
use crate::team::models::TeamId;
use crate::team_note::models::TeamNote;
use crate::user::models::UserId;

/// Policy violations. All but `LastAdmin` surface as forbidden.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("You do not own this note")]
    NotOwner,

    #[error("You are not a member of this team")]
    NotMember,

    #[error("This action requires the team admin role")]
    NotAdmin,

    #[error("This note does not belong to this team")]
    WrongTeam,

    #[error("Only the author or a team admin can delete this note")]
    NotAuthorOrAdmin,

    #[error("A team must keep at least one admin")]
    LastAdmin,
}

/// Requester must be the owner.
pub fn ensure_owner(requester: &UserId, owner: &UserId) -> Result<(), AccessError> {
    if requester == owner {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}

/// Turn a membership lookup into a membership, or `NotMember`.
pub fn require_member(membership: Option<Membership>) -> Result<Membership, AccessError> {
    membership.ok_or(AccessError::NotMember)
}

pub fn require_admin(membership: &Membership) -> Result<(), AccessError> {
    if membership.role.is_admin() {
        Ok(())
    } else {
        Err(AccessError::NotAdmin)
    }
}

/// The team named in the request must be the team the note is stored under.
pub fn ensure_same_team(requested: &TeamId, stored: &TeamId) -> Result<(), AccessError> {
    if requested == stored {
        Ok(())
    } else {
        Err(AccessError::WrongTeam)
    }
}

pub fn ensure_can_delete_team_note(
    membership: &Membership,
    note: &TeamNote,
) -> Result<(), AccessError> {
    if membership.user_id == note.author_id || membership.role.is_admin() {
        Ok(())
    } else {
        Err(AccessError::NotAuthorOrAdmin)
    }
}

/// Removing `target` must leave the team with at least one admin.
pub fn ensure_admin_floor(target: &Membership, admin_count: i64) -> Result<(), AccessError> {
    if target.role.is_admin() && admin_count <= 1 {
        Err(AccessError::LastAdmin)
    } else {
        Ok(())
    }
}
