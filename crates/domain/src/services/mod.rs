//! Domain services for the pickup match service.
//!
//! Services contain business logic that operates on domain models. Each one is
//! built from a [`Stores`] bundle and, when it mutates rosters, the shared
//! [`MatchLocks`](crate::locks::MatchLocks) registry.

pub mod discovery;
pub mod invitations;
pub mod lifecycle;
pub mod roster;
pub mod users;

use std::sync::Arc;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::{Match, ParticipationState, RosterCounts, User};
use crate::stores::{InMemoryStore, InvitationStore, MatchStore, ParticipationStore, UserStore};

pub use discovery::{DiscoveryDefaults, DiscoveryService};
pub use invitations::InvitationService;
pub use lifecycle::MatchService;
pub use roster::RosterService;
pub use users::UserService;

/// Handles to every store a service may consult.
#[derive(Clone)]
pub struct Stores {
    pub matches: Arc<dyn MatchStore>,
    pub participations: Arc<dyn ParticipationStore>,
    pub invitations: Arc<dyn InvitationStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Uses one in-memory store for all four contracts.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            matches: store.clone(),
            participations: store.clone(),
            invitations: store.clone(),
            users: store,
        }
    }

    pub(crate) async fn require_match(&self, match_id: Uuid) -> Result<Match, DomainError> {
        self.matches
            .get(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match"))
    }

    /// Loads a user, naming the missing role (`"Player"`, `"Organizer"`...) on failure.
    pub(crate) async fn require_user(&self, user_id: Uuid, role: &str) -> Result<User, DomainError> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(role))
    }

    pub(crate) async fn roster_counts(&self, game: &Match) -> Result<RosterCounts, DomainError> {
        let confirmed = self
            .participations
            .count_by_state(game.id, ParticipationState::Confirmed)
            .await?;
        let pending = self
            .participations
            .count_by_state(game.id, ParticipationState::Pending)
            .await?;
        Ok(RosterCounts {
            confirmed,
            pending,
            capacity: game.capacity,
        })
    }
}

pub(crate) fn ensure_organizer(game: &Match, user_id: Uuid) -> Result<(), DomainError> {
    if game.is_organizer(user_id) {
        Ok(())
    } else {
        Err(DomainError::permission_denied(
            "Only the organizer can perform this action",
        ))
    }
}
