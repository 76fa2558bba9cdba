//! Match roster engine: join requests, organizer decisions, leaving.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{ensure_organizer, Stores};
use crate::error::DomainError;
use crate::locks::MatchLocks;
use crate::models::participation::{order_roster, JoinResponse, LeaveResponse, ManageResponse};
use crate::models::{
    Match, NewParticipation, Participation, ParticipationAction, ParticipationState, Visibility,
};

#[derive(Clone)]
pub struct RosterService {
    stores: Stores,
    locks: Arc<MatchLocks>,
}

impl RosterService {
    pub fn new(stores: Stores, locks: Arc<MatchLocks>) -> Self {
        Self { stores, locks }
    }

    /// Requests a place in a match. The request starts `PENDING` until the
    /// organizer decides.
    pub async fn join(
        &self,
        match_id: Uuid,
        player_id: Uuid,
        password: Option<&str>,
    ) -> Result<JoinResponse, DomainError> {
        let player = self.stores.require_user(player_id, "User").await?;
        let _guard = self.locks.lock(match_id).await;
        let game = self.stores.require_match(match_id).await?;

        if game.is_organizer(player_id) {
            return Err(DomainError::invalid_state(
                "You are already the organizer of this match",
            ));
        }
        if self
            .stores
            .participations
            .exists_active(match_id, player_id)
            .await?
        {
            return Err(DomainError::invalid_state(
                "You already have an active request for this match",
            ));
        }
        if game.visibility == Visibility::Private {
            check_password(&game, password)?;
        }
        if self.stores.roster_counts(&game).await?.is_full() {
            return Err(DomainError::MatchFull);
        }

        let participation = self
            .stores
            .participations
            .create(NewParticipation::new(
                match_id,
                player_id,
                &player.name,
                ParticipationState::Pending,
            ))
            .await?;

        info!(
            match_id = %match_id,
            player_id = %player_id,
            participation_id = %participation.id,
            "Join request created"
        );

        Ok(JoinResponse {
            message: "Join request sent. Waiting for organizer approval".to_string(),
            match_id,
            state: participation.state,
            counts: self.stores.roster_counts(&game).await?,
        })
    }

    /// Applies an organizer decision to a participation of their match.
    pub async fn manage(
        &self,
        match_id: Uuid,
        participation_id: Uuid,
        organizer_id: Uuid,
        action: ParticipationAction,
    ) -> Result<ManageResponse, DomainError> {
        let _guard = self.locks.lock(match_id).await;
        let game = self.stores.require_match(match_id).await?;
        ensure_organizer(&game, organizer_id)?;

        let mut participation = self
            .stores
            .participations
            .get(participation_id)
            .await?
            .filter(|p| p.match_id == match_id)
            .ok_or_else(|| DomainError::not_found("Participation"))?;

        if participation.player_id == organizer_id {
            return Err(DomainError::invalid_state(
                "You cannot manage your own participation",
            ));
        }

        let message = match action {
            ParticipationAction::Approve => {
                if participation.state != ParticipationState::Pending {
                    return Err(DomainError::invalid_state(
                        "Only pending participations can be approved",
                    ));
                }
                if self.stores.roster_counts(&game).await?.is_full() {
                    return Err(DomainError::MatchFull);
                }
                participation.state = ParticipationState::Confirmed;
                format!("{} has been approved", participation.player_name)
            }
            ParticipationAction::Reject => {
                if participation.state != ParticipationState::Pending {
                    return Err(DomainError::invalid_state(
                        "Only pending participations can be rejected",
                    ));
                }
                participation.state = ParticipationState::Rejected;
                format!("{} has been rejected", participation.player_name)
            }
            ParticipationAction::Expel => {
                if participation.state != ParticipationState::Confirmed {
                    return Err(DomainError::invalid_state(
                        "Only confirmed players can be expelled",
                    ));
                }
                participation.state = ParticipationState::Cancelled;
                format!("{} has been expelled from the match", participation.player_name)
            }
        };

        self.stores.participations.update(&participation).await?;

        info!(
            match_id = %match_id,
            participation_id = %participation_id,
            action = %action,
            state = %participation.state,
            "Participation managed"
        );

        Ok(ManageResponse {
            message,
            match_id,
            counts: self.stores.roster_counts(&game).await?,
        })
    }

    /// Cancels the caller's active participation.
    pub async fn leave(&self, match_id: Uuid, player_id: Uuid) -> Result<LeaveResponse, DomainError> {
        self.stores.require_user(player_id, "User").await?;
        let _guard = self.locks.lock(match_id).await;
        let game = self.stores.require_match(match_id).await?;

        if game.is_organizer(player_id) {
            return Err(DomainError::invalid_state(
                "The organizer cannot leave their own match",
            ));
        }

        let mut participation = self
            .stores
            .participations
            .find_active(match_id, player_id)
            .await?
            .ok_or_else(|| {
                DomainError::invalid_state("You have no active participation in this match")
            })?;

        let previous_state = participation.state;
        participation.state = ParticipationState::Cancelled;
        self.stores.participations.update(&participation).await?;

        info!(
            match_id = %match_id,
            player_id = %player_id,
            previous_state = %previous_state,
            "Player left match"
        );

        Ok(LeaveResponse {
            message: format!("You left the match (you were {previous_state})"),
            match_id,
            previous_state,
            counts: self.stores.roster_counts(&game).await?,
        })
    }

    /// Active participations: confirmed first, then oldest request first.
    pub async fn participants(&self, match_id: Uuid) -> Result<Vec<Participation>, DomainError> {
        self.stores.require_match(match_id).await?;
        let mut roster: Vec<Participation> = self
            .stores
            .participations
            .list_by_match(match_id)
            .await?
            .into_iter()
            .filter(|p| p.state.is_active())
            .collect();
        order_roster(&mut roster);
        Ok(roster)
    }
}

fn check_password(game: &Match, password: Option<&str>) -> Result<(), DomainError> {
    match password {
        None | Some("") => Err(DomainError::MissingCredential),
        Some(candidate) if game.password_matches(candidate) => Ok(()),
        Some(_) => Err(DomainError::InvalidCredential),
    }
}
