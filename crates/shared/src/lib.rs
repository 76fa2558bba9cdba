//! Shared utilities and common types for the pickup match backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Great-circle distance between coordinates
//! - Case and accent insensitive text matching
//! - Civil (zone-less) time handling in the fixed source offset
//! - Common validation logic

pub mod distance;
pub mod text;
pub mod time;
pub mod validation;
