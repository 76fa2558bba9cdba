//! Domain layer for the pickup match service.
//!
//! This crate contains:
//! - Domain models (Match, Participation, Invitation, User) and request DTOs
//! - Store contracts plus an in-memory implementation
//! - The per-match lock registry
//! - Business logic services
//! - Domain error types

pub mod error;
pub mod locks;
pub mod models;
pub mod services;
pub mod stores;

pub use error::{DomainError, StoreError};
pub use locks::{MatchGuard, MatchLocks};
