//! Player profile reads and updates.

use tracing::info;
use uuid::Uuid;

use super::Stores;
use crate::error::DomainError;
use crate::models::user::AvailabilityResponse;
use crate::models::{UpdateUserRequest, User};

#[derive(Clone)]
pub struct UserService {
    stores: Stores,
}

impl UserService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.stores.require_user(user_id, "User").await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.stores.require_user(user_id, "User").await?;
        request.apply_to(&mut user);
        self.stores.users.update(&user).await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    pub async fn set_availability(
        &self,
        user_id: Uuid,
        available: bool,
    ) -> Result<AvailabilityResponse, DomainError> {
        self.stores.require_user(user_id, "User").await?;
        self.stores.users.set_available(user_id, available).await?;
        info!(user_id = %user_id, available, "Availability changed");

        let message = if available {
            "You are now available for matches"
        } else {
            "You are no longer available for matches"
        };
        Ok(AvailabilityResponse {
            message: message.to_string(),
            user_id,
            available,
        })
    }
}
