//! Common validation utilities.

use validator::ValidationError;

/// Smallest roster a match may be created with.
pub const MIN_MATCH_CAPACITY: i32 = 2;

/// Largest roster a match may be created with (full eleven-a-side).
pub const MAX_MATCH_CAPACITY: i32 = 22;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a price per person is not negative.
pub fn validate_price(price: i64) -> Result<(), ValidationError> {
    if price >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price per person cannot be negative".into());
        Err(err)
    }
}

/// Validates that a match capacity is within the supported roster sizes.
pub fn validate_capacity(capacity: i32) -> Result<(), ValidationError> {
    if (MIN_MATCH_CAPACITY..=MAX_MATCH_CAPACITY).contains(&capacity) {
        Ok(())
    } else {
        let mut err = ValidationError::new("capacity_range");
        err.message = Some(
            format!("Capacity must be between {MIN_MATCH_CAPACITY} and {MAX_MATCH_CAPACITY}")
                .into(),
        );
        Err(err)
    }
}

/// Validates that a search radius is positive and finite.
pub fn validate_radius_km(radius: f64) -> Result<(), ValidationError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("radius_range");
        err.message = Some("Search radius must be a positive number of kilometers".into());
        Err(err)
    }
}
