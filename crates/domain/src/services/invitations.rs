//! Invitation engine: organizers invite players, players answer.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{ensure_organizer, Stores};
use crate::error::DomainError;
use crate::locks::MatchLocks;
use crate::models::invitation::InviteResponse;
use crate::models::{
    InvitationDetails, InvitationState, MatchMessage, NewInvitation, NewParticipation,
    ParticipationState,
};

#[derive(Clone)]
pub struct InvitationService {
    stores: Stores,
    locks: Arc<MatchLocks>,
}

impl InvitationService {
    pub fn new(stores: Stores, locks: Arc<MatchLocks>) -> Self {
        Self { stores, locks }
    }

    /// Invites `player_id` to a match organized by `organizer_id`.
    pub async fn invite(
        &self,
        match_id: Uuid,
        player_id: Uuid,
        organizer_id: Uuid,
    ) -> Result<InviteResponse, DomainError> {
        self.stores.require_user(organizer_id, "Organizer").await?;
        let player = self.stores.require_user(player_id, "Player").await?;
        let _guard = self.locks.lock(match_id).await;
        let game = self.stores.require_match(match_id).await?;
        ensure_organizer(&game, organizer_id)?;

        if player_id == organizer_id {
            return Err(DomainError::invalid_state("You cannot invite yourself"));
        }
        if self
            .stores
            .participations
            .exists_active(match_id, player_id)
            .await?
        {
            return Err(DomainError::invalid_state(
                "The player is already participating in this match",
            ));
        }
        if self
            .stores
            .invitations
            .exists_pending(match_id, player_id)
            .await?
        {
            return Err(DomainError::invalid_state(
                "The player already has a pending invitation to this match",
            ));
        }

        let invitation = self
            .stores
            .invitations
            .create(NewInvitation {
                match_id,
                player_id,
                invited_at: Utc::now(),
            })
            .await?;

        info!(
            match_id = %match_id,
            player_id = %player_id,
            invitation_id = %invitation.id,
            "Invitation sent"
        );

        Ok(InviteResponse {
            invitation_id: invitation.id,
            message: format!("Invitation sent to {}", player.name),
        })
    }

    /// Accepts or declines a pending invitation addressed to `player_id`.
    ///
    /// Accepting reuses the player's existing participation row for the match
    /// (active first, then the latest historical one) before inserting a new
    /// confirmed row.
    pub async fn respond(
        &self,
        invitation_id: Uuid,
        player_id: Uuid,
        accept: bool,
    ) -> Result<MatchMessage, DomainError> {
        let player = self.stores.require_user(player_id, "User").await?;
        let invitation = self
            .stores
            .invitations
            .get(invitation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invitation"))?;
        if invitation.player_id != player_id {
            return Err(DomainError::permission_denied(
                "You cannot respond to this invitation",
            ));
        }

        let match_id = invitation.match_id;
        let _guard = self.locks.lock(match_id).await;

        // Re-read under the lock; a concurrent answer may have landed.
        let mut invitation = self
            .stores
            .invitations
            .get(invitation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invitation"))?;
        if invitation.state != InvitationState::Pending {
            return Err(DomainError::invalid_state(
                "This invitation has already been answered",
            ));
        }

        if !accept {
            invitation.answer(false);
            self.stores.invitations.update(&invitation).await?;
            info!(invitation_id = %invitation_id, player_id = %player_id, "Invitation declined");
            return Ok(MatchMessage {
                message: "Invitation declined".to_string(),
                match_id,
            });
        }

        let game = self.stores.require_match(match_id).await?;
        let participations = &self.stores.participations;
        let existing = match participations.find_active(match_id, player_id).await? {
            Some(active) => Some(active),
            None => {
                participations
                    .find_by_match_and_player(match_id, player_id)
                    .await?
            }
        };

        match existing {
            Some(participation) if participation.state == ParticipationState::Confirmed => {}
            Some(mut participation) => {
                if self.stores.roster_counts(&game).await?.is_full() {
                    return Err(DomainError::MatchFull);
                }
                participation.state = ParticipationState::Confirmed;
                participations.update(&participation).await?;
            }
            None => {
                if self.stores.roster_counts(&game).await?.is_full() {
                    return Err(DomainError::MatchFull);
                }
                participations
                    .create(NewParticipation::new(
                        match_id,
                        player_id,
                        &player.name,
                        ParticipationState::Confirmed,
                    ))
                    .await?;
            }
        }

        invitation.answer(true);
        self.stores.invitations.update(&invitation).await?;

        info!(invitation_id = %invitation_id, player_id = %player_id, "Invitation accepted");

        Ok(MatchMessage {
            message: "Invitation accepted. You have joined the match".to_string(),
            match_id,
        })
    }

    /// A player's invitations in `state` (pending by default), newest first.
    pub async fn list_for_player(
        &self,
        player_id: Uuid,
        state: Option<InvitationState>,
    ) -> Result<Vec<InvitationDetails>, DomainError> {
        self.stores.require_user(player_id, "User").await?;
        let invitations = self
            .stores
            .invitations
            .list_by_player(player_id, Some(state.unwrap_or_default()))
            .await?;
        Ok(invitations)
    }
}
