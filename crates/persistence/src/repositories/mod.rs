//! Repository implementations of the domain store contracts.

pub mod invitation;
pub mod matches;
pub mod participation;
pub mod user;

pub use invitation::InvitationRepository;
pub use matches::MatchRepository;
pub use participation::ParticipationRepository;
pub use user::UserRepository;

use domain::StoreError;

const UNIQUE_VIOLATION: &str = "23505";

/// Maps a sqlx failure onto the store error taxonomy.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    tracing::error!(error = %err, "Database query failed");
    StoreError::Backend(err.to_string())
}
