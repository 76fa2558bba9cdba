//! Custom Axum extractors.

pub mod caller;

pub use caller::{Caller, CALLER_HEADER};
