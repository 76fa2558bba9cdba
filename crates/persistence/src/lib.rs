//! Persistence layer for the pickup match service.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain store contracts
//! - Query metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

use std::sync::Arc;

use domain::services::Stores;
use sqlx::PgPool;

use repositories::{
    InvitationRepository, MatchRepository, ParticipationRepository, UserRepository,
};

/// Builds the store bundle backed by PostgreSQL.
pub fn pg_stores(pool: PgPool) -> Stores {
    Stores {
        matches: Arc::new(MatchRepository::new(pool.clone())),
        participations: Arc::new(ParticipationRepository::new(pool.clone())),
        invitations: Arc::new(InvitationRepository::new(pool.clone())),
        users: Arc::new(UserRepository::new(pool)),
    }
}
