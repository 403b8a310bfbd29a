//! ProfileHandler - The caller's own directory entry.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{ProfileDetails, UserError, UserProfile};
use crate::ports::UserRepository;

/// Command to create or edit the caller's profile.
#[derive(Debug, Clone)]
pub struct SaveProfileCommand {
    pub caller: AuthenticatedUser,
    pub details: ProfileDetails,
}

pub struct ProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl ProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get(&self, caller: &AuthenticatedUser) -> Result<UserProfile, UserError> {
        self.users
            .find_by_id(&caller.id)
            .await?
            .ok_or_else(|| UserError::NotFound(caller.id.clone()))
    }

    /// The first save registers the caller with the role from their token.
    /// Later saves never touch the role.
    pub async fn save(&self, cmd: SaveProfileCommand) -> Result<UserProfile, UserError> {
        let profile = match self.users.find_by_id(&cmd.caller.id).await? {
            Some(mut existing) => {
                existing.update(cmd.details)?;
                existing
            }
            None => {
                let created = UserProfile::register(cmd.caller.id, cmd.caller.role, cmd.details)?;
                tracing::info!(user_id = %created.id(), role = %created.role(), "profile registered");
                created
            }
        };

        self.users.save(&profile).await?;
        Ok(profile)
    }
}
