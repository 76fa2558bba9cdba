//! Store contracts consumed by the domain services.
//!
//! Implementations live in the `persistence` crate (PostgreSQL) and in
//! [`memory`] (in-process, used by tests and local runs).

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Gender, Invitation, InvitationDetails, InvitationState, Match, MatchSearchCriteria,
    MatchSummary, NewInvitation, NewMatch, NewParticipation, Participation, ParticipationState,
    Position, User,
};

pub use memory::InMemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Rows removed together with a deleted match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedRows {
    pub participations: u64,
    pub invitations: u64,
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Persists a new match in `PENDING` state together with the organizer's
    /// `CONFIRMED` participation. Either both rows are written or neither is.
    async fn create_with_organizer(
        &self,
        new_match: NewMatch,
        organizer_name: &str,
    ) -> StoreResult<Match>;

    async fn get(&self, match_id: Uuid) -> StoreResult<Option<Match>>;

    /// Writes every mutable field of `updated` back.
    async fn update(&self, updated: &Match) -> StoreResult<()>;

    /// Deletes a match with all of its participations and invitations in
    /// one unit of work.
    async fn delete_cascade(&self, match_id: Uuid) -> StoreResult<DeletedRows>;

    /// Upcoming matches matching `criteria` that the player has no active
    /// participation in, with confirmed counts and organizer names.
    async fn search(&self, criteria: &MatchSearchCriteria) -> StoreResult<Vec<MatchSummary>>;

    /// Matches the player is confirmed in within `[from, to]`, by start time.
    async fn calendar(
        &self,
        player_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> StoreResult<Vec<MatchSummary>>;
}

#[async_trait]
pub trait ParticipationStore: Send + Sync {
    /// Inserts a row. Fails with `Conflict` when an active row already exists
    /// for the same (match, player).
    async fn create(&self, new_participation: NewParticipation) -> StoreResult<Participation>;

    async fn get(&self, participation_id: Uuid) -> StoreResult<Option<Participation>>;

    /// Most recent row for (match, player), whatever its state.
    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>>;

    /// The pending or confirmed row for (match, player), if any.
    async fn find_active(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>>;

    async fn list_by_match(&self, match_id: Uuid) -> StoreResult<Vec<Participation>>;

    async fn count_by_state(&self, match_id: Uuid, state: ParticipationState) -> StoreResult<i64>;

    async fn update(&self, participation: &Participation) -> StoreResult<()>;

    async fn exists_active(&self, match_id: Uuid, player_id: Uuid) -> StoreResult<bool> {
        Ok(self.find_active(match_id, player_id).await?.is_some())
    }
}

#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Inserts a pending invitation. Fails with `Conflict` when one is
    /// already pending for the same (match, player).
    async fn create(&self, new_invitation: NewInvitation) -> StoreResult<Invitation>;

    async fn get(&self, invitation_id: Uuid) -> StoreResult<Option<Invitation>>;

    /// A player's invitations, newest first, joined with match info.
    async fn list_by_player(
        &self,
        player_id: Uuid,
        state: Option<InvitationState>,
    ) -> StoreResult<Vec<InvitationDetails>>;

    async fn exists_pending(&self, match_id: Uuid, player_id: Uuid) -> StoreResult<bool>;

    async fn update(&self, invitation: &Invitation) -> StoreResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    async fn update(&self, user: &User) -> StoreResult<()>;

    async fn set_available(&self, user_id: Uuid, available: bool) -> StoreResult<()>;

    /// Users flagged available, excluding `excluding`.
    async fn list_available(
        &self,
        excluding: Uuid,
        gender: Option<Gender>,
        position: Option<Position>,
    ) -> StoreResult<Vec<User>>;
}
