//! In-process store implementing every store contract.
//!
//! Enforces the same uniqueness rules as the PostgreSQL schema so services
//! behave identically against either backend.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    DeletedRows, InvitationStore, MatchStore, ParticipationStore, StoreResult, UserStore,
};
use crate::error::StoreError;
use crate::models::{
    Gender, Invitation, InvitationDetails, InvitationState, Match, MatchSearchCriteria,
    MatchStatus, MatchSummary, NewInvitation, NewMatch, NewParticipation, Participation,
    ParticipationState, Position, User,
};

#[derive(Debug, Default)]
struct MemoryState {
    matches: HashMap<Uuid, Match>,
    // Insertion order doubles as recency for "latest row" lookups.
    participations: Vec<Participation>,
    invitations: Vec<Invitation>,
    users: HashMap<Uuid, User>,
}

impl MemoryState {
    fn confirmed_count(&self, match_id: Uuid) -> i64 {
        self.participations
            .iter()
            .filter(|p| p.match_id == match_id && p.state == ParticipationState::Confirmed)
            .count() as i64
    }

    fn summarize(&self, info: &Match) -> MatchSummary {
        MatchSummary {
            info: info.clone(),
            confirmed_count: self.confirmed_count(info.id),
            organizer_name: self.users.get(&info.organizer_id).map(|u| u.name.clone()),
        }
    }

    fn has_active(&self, match_id: Uuid, player_id: Uuid) -> bool {
        self.participations
            .iter()
            .any(|p| p.match_id == match_id && p.player_id == player_id && p.state.is_active())
    }
}

/// Store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user. Users are owned by an external system; this is the
    /// seeding entry point.
    pub async fn insert_user(&self, user: User) {
        self.state.write().await.users.insert(user.id, user);
    }

    pub async fn remove_user(&self, user_id: Uuid) {
        self.state.write().await.users.remove(&user_id);
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn create_with_organizer(
        &self,
        new_match: NewMatch,
        organizer_name: &str,
    ) -> StoreResult<Match> {
        let created = Match {
            id: Uuid::new_v4(),
            title: new_match.title,
            price_per_person: new_match.price_per_person,
            description: new_match.description,
            starts_at: new_match.starts_at,
            latitude: new_match.latitude,
            longitude: new_match.longitude,
            location_text: new_match.location_text,
            capacity: new_match.capacity,
            organizer_id: new_match.organizer_id,
            visibility: new_match.visibility,
            format: new_match.format,
            min_age: new_match.min_age,
            status: MatchStatus::Pending,
            password: new_match.password,
            created_at: Utc::now(),
        };
        let organizer = NewParticipation::new(
            created.id,
            created.organizer_id,
            organizer_name,
            ParticipationState::Confirmed,
        );

        let mut state = self.state.write().await;
        state.matches.insert(created.id, created.clone());
        state.participations.push(Participation {
            id: Uuid::new_v4(),
            match_id: organizer.match_id,
            player_id: organizer.player_id,
            player_name: organizer.player_name,
            state: organizer.state,
            requested_at: organizer.requested_at,
        });
        Ok(created)
    }

    async fn get(&self, match_id: Uuid) -> StoreResult<Option<Match>> {
        Ok(self.state.read().await.matches.get(&match_id).cloned())
    }

    async fn update(&self, updated: &Match) -> StoreResult<()> {
        let mut state = self.state.write().await;
        match state.matches.get_mut(&updated.id) {
            Some(existing) => {
                *existing = updated.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "match {} does not exist",
                updated.id
            ))),
        }
    }

    async fn delete_cascade(&self, match_id: Uuid) -> StoreResult<DeletedRows> {
        let mut state = self.state.write().await;
        let participations = state.participations.len();
        let invitations = state.invitations.len();

        state.participations.retain(|p| p.match_id != match_id);
        state.invitations.retain(|i| i.match_id != match_id);
        state.matches.remove(&match_id);

        Ok(DeletedRows {
            participations: (participations - state.participations.len()) as u64,
            invitations: (invitations - state.invitations.len()) as u64,
        })
    }

    async fn search(&self, criteria: &MatchSearchCriteria) -> StoreResult<Vec<MatchSummary>> {
        let state = self.state.read().await;
        let title = criteria.title.as_ref().map(|t| t.to_lowercase());

        let mut results: Vec<MatchSummary> = state
            .matches
            .values()
            .filter(|m| m.starts_at >= criteria.not_before)
            .filter(|m| !state.has_active(m.id, criteria.player_id))
            .filter(|m| {
                title
                    .as_deref()
                    .map_or(true, |t| m.title.to_lowercase().contains(t))
            })
            .filter(|m| criteria.from.map_or(true, |from| m.starts_at >= from))
            .filter(|m| criteria.to.map_or(true, |to| m.starts_at <= to))
            .filter(|m| criteria.format.map_or(true, |f| m.format == f))
            .filter(|m| criteria.min_age_ceiling.map_or(true, |c| m.min_age <= c))
            .map(|m| state.summarize(m))
            .collect();

        results.sort_by_key(|s| s.info.starts_at);
        Ok(results)
    }

    async fn calendar(
        &self,
        player_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> StoreResult<Vec<MatchSummary>> {
        let state = self.state.read().await;

        let mut results: Vec<MatchSummary> = state
            .participations
            .iter()
            .filter(|p| p.player_id == player_id && p.state == ParticipationState::Confirmed)
            .filter_map(|p| state.matches.get(&p.match_id))
            .filter(|m| m.starts_at >= from && m.starts_at <= to)
            .map(|m| state.summarize(m))
            .collect();

        results.sort_by_key(|s| s.info.starts_at);
        Ok(results)
    }
}

#[async_trait]
impl ParticipationStore for InMemoryStore {
    async fn create(&self, new_participation: NewParticipation) -> StoreResult<Participation> {
        let mut state = self.state.write().await;
        if new_participation.state.is_active()
            && state.has_active(new_participation.match_id, new_participation.player_id)
        {
            return Err(StoreError::Conflict(format!(
                "player {} already has an active participation in match {}",
                new_participation.player_id, new_participation.match_id
            )));
        }

        let created = Participation {
            id: Uuid::new_v4(),
            match_id: new_participation.match_id,
            player_id: new_participation.player_id,
            player_name: new_participation.player_name,
            state: new_participation.state,
            requested_at: new_participation.requested_at,
        };
        state.participations.push(created.clone());
        Ok(created)
    }

    async fn get(&self, participation_id: Uuid) -> StoreResult<Option<Participation>> {
        let state = self.state.read().await;
        Ok(state
            .participations
            .iter()
            .find(|p| p.id == participation_id)
            .cloned())
    }

    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>> {
        let state = self.state.read().await;
        Ok(state
            .participations
            .iter()
            .rev()
            .find(|p| p.match_id == match_id && p.player_id == player_id)
            .cloned())
    }

    async fn find_active(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>> {
        let state = self.state.read().await;
        Ok(state
            .participations
            .iter()
            .find(|p| p.match_id == match_id && p.player_id == player_id && p.state.is_active())
            .cloned())
    }

    async fn list_by_match(&self, match_id: Uuid) -> StoreResult<Vec<Participation>> {
        let state = self.state.read().await;
        Ok(state
            .participations
            .iter()
            .filter(|p| p.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn count_by_state(&self, match_id: Uuid, state: ParticipationState) -> StoreResult<i64> {
        let guard = self.state.read().await;
        Ok(guard
            .participations
            .iter()
            .filter(|p| p.match_id == match_id && p.state == state)
            .count() as i64)
    }

    async fn update(&self, participation: &Participation) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if participation.state.is_active()
            && state.participations.iter().any(|p| {
                p.id != participation.id
                    && p.match_id == participation.match_id
                    && p.player_id == participation.player_id
                    && p.state.is_active()
            })
        {
            return Err(StoreError::Conflict(format!(
                "player {} already has an active participation in match {}",
                participation.player_id, participation.match_id
            )));
        }

        match state
            .participations
            .iter_mut()
            .find(|p| p.id == participation.id)
        {
            Some(existing) => {
                *existing = participation.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "participation {} does not exist",
                participation.id
            ))),
        }
    }
}

#[async_trait]
impl InvitationStore for InMemoryStore {
    async fn create(&self, new_invitation: NewInvitation) -> StoreResult<Invitation> {
        let mut state = self.state.write().await;
        let duplicate = state.invitations.iter().any(|i| {
            i.match_id == new_invitation.match_id
                && i.player_id == new_invitation.player_id
                && i.state == InvitationState::Pending
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "player {} already has a pending invitation to match {}",
                new_invitation.player_id, new_invitation.match_id
            )));
        }

        let created = Invitation {
            id: Uuid::new_v4(),
            match_id: new_invitation.match_id,
            player_id: new_invitation.player_id,
            state: InvitationState::Pending,
            invited_at: new_invitation.invited_at,
            responded_at: None,
        };
        state.invitations.push(created.clone());
        Ok(created)
    }

    async fn get(&self, invitation_id: Uuid) -> StoreResult<Option<Invitation>> {
        let state = self.state.read().await;
        Ok(state
            .invitations
            .iter()
            .find(|i| i.id == invitation_id)
            .cloned())
    }

    async fn list_by_player(
        &self,
        player_id: Uuid,
        filter: Option<InvitationState>,
    ) -> StoreResult<Vec<InvitationDetails>> {
        let state = self.state.read().await;

        let mut results: Vec<InvitationDetails> = state
            .invitations
            .iter()
            .filter(|i| i.player_id == player_id)
            .filter(|i| filter.map_or(true, |s| i.state == s))
            .filter_map(|i| {
                state.matches.get(&i.match_id).map(|m| InvitationDetails {
                    invitation: i.clone(),
                    match_title: m.title.clone(),
                    match_starts_at: m.starts_at,
                    match_location_text: m.location_text.clone(),
                })
            })
            .collect();

        results.sort_by(|a, b| b.invitation.invited_at.cmp(&a.invitation.invited_at));
        Ok(results)
    }

    async fn exists_pending(&self, match_id: Uuid, player_id: Uuid) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.invitations.iter().any(|i| {
            i.match_id == match_id && i.player_id == player_id && i.state == InvitationState::Pending
        }))
    }

    async fn update(&self, invitation: &Invitation) -> StoreResult<()> {
        let mut state = self.state.write().await;
        match state.invitations.iter_mut().find(|i| i.id == invitation.id) {
            Some(existing) => {
                *existing = invitation.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "invitation {} does not exist",
                invitation.id
            ))),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!("user {} does not exist", user.id))),
        }
    }

    async fn set_available(&self, user_id: Uuid, available: bool) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.get_mut(&user_id) {
            user.available = available;
        }
        Ok(())
    }

    async fn list_available(
        &self,
        excluding: Uuid,
        gender: Option<Gender>,
        position: Option<Position>,
    ) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| u.available && u.id != excluding)
            .filter(|u| gender.map_or(true, |g| u.gender == g))
            .filter(|u| position.map_or(true, |p| u.position == p))
            .cloned()
            .collect())
    }
}
