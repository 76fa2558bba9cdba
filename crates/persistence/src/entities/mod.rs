//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod invitation;
pub mod matches;
pub mod participation;
pub mod user;

pub use invitation::{InvitationDetailsEntity, InvitationEntity, InvitationStateDb};
pub use matches::{MatchEntity, MatchStatusDb, MatchSummaryEntity, SoccerFormatDb, VisibilityDb};
pub use participation::{ParticipationEntity, ParticipationStateDb};
pub use user::{GenderDb, PositionDb, UserEntity};
