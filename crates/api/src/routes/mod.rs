//! Route handlers.

pub mod health;
pub mod invitations;
pub mod matches;
pub mod users;

use crate::config::DiscoveryConfig;
use crate::error::ApiError;

/// Rejects an explicit search radius above the configured ceiling.
pub(crate) fn ensure_radius_within(
    discovery: &DiscoveryConfig,
    radius_km: Option<f64>,
) -> Result<(), ApiError> {
    match radius_km {
        Some(radius) if radius > discovery.max_radius_km => Err(ApiError::validation(format!(
            "max_distance_km cannot exceed {} km",
            discovery.max_radius_km
        ))),
        _ => Ok(()),
    }
}
