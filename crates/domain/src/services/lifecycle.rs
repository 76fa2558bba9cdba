//! Match lifecycle: creation, partial updates, deletion and the detail view.

use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{ensure_organizer, Stores};
use crate::error::DomainError;
use crate::locks::MatchLocks;
use crate::models::participation::order_roster;
use crate::models::{
    CreateMatchRequest, Match, MatchDetail, MatchMessage, NewMatch, ParticipationState,
    UpdateMatchRequest, Visibility,
};

/// Matches can only be deleted this long before they start.
pub const DELETE_DEADLINE_HOURS: i64 = 24;

/// Whether a match starting at `starts_at` may still be deleted at `now`.
/// Both instants are civil time.
pub fn can_delete(starts_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    now <= starts_at - Duration::hours(DELETE_DEADLINE_HOURS)
}

#[derive(Clone)]
pub struct MatchService {
    stores: Stores,
    locks: Arc<MatchLocks>,
}

impl MatchService {
    pub fn new(stores: Stores, locks: Arc<MatchLocks>) -> Self {
        Self { stores, locks }
    }

    /// Creates a match and confirms its organizer on the roster.
    ///
    /// The request is expected to have passed validation already.
    pub async fn create(
        &self,
        organizer_id: Uuid,
        request: CreateMatchRequest,
    ) -> Result<Match, DomainError> {
        let organizer = self.stores.require_user(organizer_id, "Organizer").await?;

        let password = match request.visibility {
            Visibility::Private => match request.password {
                Some(password) if !password.is_empty() => Some(password),
                _ => return Err(DomainError::MissingCredential),
            },
            Visibility::Public => None,
        };

        let new_match = NewMatch {
            title: request.title,
            price_per_person: request.price_per_person,
            description: request.description,
            starts_at: request.starts_at.to_civil(),
            latitude: request.latitude,
            longitude: request.longitude,
            location_text: request.location_text,
            capacity: request.capacity,
            organizer_id,
            visibility: request.visibility,
            format: request.format,
            min_age: request.min_age,
            password,
        };
        let game = self
            .stores
            .matches
            .create_with_organizer(new_match, &organizer.name)
            .await?;

        info!(
            match_id = %game.id,
            organizer_id = %organizer_id,
            starts_at = %game.starts_at,
            capacity = game.capacity,
            "Match created"
        );

        Ok(game)
    }

    /// Applies a partial update. Capacity may not drop below the confirmed count.
    pub async fn update(
        &self,
        match_id: Uuid,
        organizer_id: Uuid,
        request: UpdateMatchRequest,
    ) -> Result<Match, DomainError> {
        let _guard = self.locks.lock(match_id).await;
        let mut game = self.stores.require_match(match_id).await?;
        ensure_organizer(&game, organizer_id)?;

        if let Some(capacity) = request.capacity {
            let confirmed = self
                .stores
                .participations
                .count_by_state(match_id, ParticipationState::Confirmed)
                .await?;
            if i64::from(capacity) < confirmed {
                return Err(DomainError::InvalidCapacity { confirmed });
            }
            game.capacity = capacity;
        }
        if let Some(price) = request.price_per_person {
            game.price_per_person = price;
        }
        if let Some(description) = request.description {
            game.description = Some(description);
        }
        if let Some(latitude) = request.latitude {
            game.latitude = latitude;
        }
        if let Some(longitude) = request.longitude {
            game.longitude = longitude;
        }
        if let Some(location_text) = request.location_text {
            game.location_text = location_text;
        }
        if let Some(min_age) = request.min_age {
            game.min_age = min_age;
        }
        if let Some(password) = request.password {
            game.set_password(&password);
        }

        self.stores.matches.update(&game).await?;
        info!(match_id = %match_id, "Match updated");
        Ok(game)
    }

    /// Deletes a match with its participations and invitations.
    pub async fn delete(
        &self,
        match_id: Uuid,
        organizer_id: Uuid,
    ) -> Result<MatchMessage, DomainError> {
        let _guard = self.locks.lock(match_id).await;
        let game = self.stores.require_match(match_id).await?;
        ensure_organizer(&game, organizer_id)?;

        if !can_delete(game.starts_at, shared::time::civil_now()) {
            return Err(DomainError::invalid_state(format!(
                "A match cannot be deleted less than {DELETE_DEADLINE_HOURS} hours before it starts"
            )));
        }

        let removed = self.stores.matches.delete_cascade(match_id).await?;

        info!(
            match_id = %match_id,
            participations = removed.participations,
            invitations = removed.invitations,
            "Match deleted"
        );

        Ok(MatchMessage {
            message: "Match deleted".to_string(),
            match_id,
        })
    }

    /// Full view of a match with counts and its ordered active roster.
    pub async fn detail(&self, match_id: Uuid, viewer_id: Uuid) -> Result<MatchDetail, DomainError> {
        self.stores.require_user(viewer_id, "User").await?;
        let game = self.stores.require_match(match_id).await?;

        let mut participants: Vec<_> = self
            .stores
            .participations
            .list_by_match(match_id)
            .await?
            .into_iter()
            .filter(|p| p.state.is_active())
            .collect();
        order_roster(&mut participants);

        let counts = self.stores.roster_counts(&game).await?;
        let organizer_name = self
            .stores
            .users
            .get(game.organizer_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(MatchDetail {
            info: game,
            confirmed_count: counts.confirmed,
            pending_count: counts.pending,
            has_room: !counts.is_full(),
            organizer_name,
            participants,
        })
    }
}
