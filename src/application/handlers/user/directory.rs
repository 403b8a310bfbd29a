//! Administrative user directory: list, inspect, change roles, delete.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Role, UserId};
use crate::domain::user::{UserError, UserProfile};
use crate::ports::{UserFilter, UserRepository};

/// Command to grant or revoke the admin role.
#[derive(Debug, Clone)]
pub struct ChangeRoleCommand {
    pub admin: AuthenticatedUser,
    pub user_id: UserId,
    pub role: Role,
}

/// Command to remove a user from the directory.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub admin: AuthenticatedUser,
    pub user_id: UserId,
}

/// Handler for the admin directory.
///
/// An administrator may not demote or delete themselves, so the directory
/// always keeps the admin who is using it.
pub struct UserDirectoryHandler {
    users: Arc<dyn UserRepository>,
}

impl UserDirectoryHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self, filter: UserFilter) -> Result<Vec<UserProfile>, UserError> {
        Ok(self.users.list(&filter).await?)
    }

    pub async fn get(&self, id: UserId) -> Result<UserProfile, UserError> {
        self.users
            .find_by_id(&id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn change_role(&self, cmd: ChangeRoleCommand) -> Result<UserProfile, UserError> {
        if cmd.user_id == cmd.admin.id && cmd.role != Role::Admin {
            return Err(UserError::SelfModification("demote"));
        }

        let mut user = self.get(cmd.user_id).await?;
        if user.set_role(cmd.role) {
            self.users.save(&user).await?;
            tracing::info!(
                user_id = %user.id(),
                role = %user.role(),
                changed_by = %cmd.admin.id,
                "user role changed"
            );
        }
        Ok(user)
    }

    pub async fn delete(&self, cmd: DeleteUserCommand) -> Result<(), UserError> {
        if cmd.user_id == cmd.admin.id {
            return Err(UserError::SelfModification("delete"));
        }

        self.users.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, deleted_by = %cmd.admin.id, "user deleted");
        Ok(())
    }
}
