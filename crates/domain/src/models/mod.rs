//! Domain models for the pickup match service.

pub mod invitation;
pub mod matches;
pub mod participation;
pub mod user;

pub use invitation::{Invitation, InvitationDetails, InvitationState, NewInvitation};
pub use matches::{
    CalendarEntry, CreateMatchRequest, Match, MatchDetail, MatchMessage, MatchSearchCriteria,
    MatchSearchQuery, MatchSearchResult, MatchStatus, MatchSummary, NewMatch, SoccerFormat,
    StartTime, UpdateMatchRequest, Visibility,
};
pub use participation::{
    NewParticipation, Participation, ParticipationAction, ParticipationState, RosterCounts,
};
pub use user::{AvailablePlayer, AvailablePlayersQuery, Gender, Position, UpdateUserRequest, User};
