//! HTTP handlers for user directory endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::error_response;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::user::{
    ChangeRoleCommand, DeleteUserCommand, ProfileHandler, SaveProfileCommand, UserDirectoryHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::{ProfileDetails, UserError};
use crate::ports::UserRepository;

use super::dto::{ChangeRoleRequest, UserQuery};

/// Dependencies for the user directory endpoints.
#[derive(Clone)]
pub struct UserAppState {
    pub users: Arc<dyn UserRepository>,
}

impl UserAppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn profile_handler(&self) -> ProfileHandler {
        ProfileHandler::new(self.users.clone())
    }

    pub fn directory_handler(&self) -> UserDirectoryHandler {
        UserDirectoryHandler::new(self.users.clone())
    }
}

/// GET /api/users/me - The caller's profile
pub async fn get_my_profile(
    State(state): State<UserAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, UserApiError> {
    let profile = state.profile_handler().get(&user).await?;
    Ok(Json(profile))
}

/// PUT /api/users/me - Create or edit the caller's profile
pub async fn save_my_profile(
    State(state): State<UserAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(details): ApiJson<ProfileDetails>,
) -> Result<impl IntoResponse, UserApiError> {
    let profile = state
        .profile_handler()
        .save(SaveProfileCommand {
            caller: user,
            details,
        })
        .await?;
    Ok(Json(profile))
}

/// GET /api/admin/users - List users
pub async fn list_users(
    State(state): State<UserAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, UserApiError> {
    let users = state.directory_handler().list(query.into()).await?;
    Ok(Json(users))
}

/// GET /api/admin/users/:id - One user
pub async fn get_user(
    State(state): State<UserAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, UserApiError> {
    let user = state.directory_handler().get(parse_user_id(user_id)?).await?;
    Ok(Json(user))
}

/// PATCH /api/admin/users/:id/role - Grant or revoke admin
pub async fn change_user_role(
    State(state): State<UserAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
    ApiJson(request): ApiJson<ChangeRoleRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let cmd = ChangeRoleCommand {
        admin,
        user_id: parse_user_id(user_id)?,
        role: request.role,
    };
    let user = state.directory_handler().change_role(cmd).await?;
    Ok(Json(user))
}

/// DELETE /api/admin/users/:id - Remove a user
pub async fn delete_user(
    State(state): State<UserAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, UserApiError> {
    let cmd = DeleteUserCommand {
        admin,
        user_id: parse_user_id(user_id)?,
    };
    state.directory_handler().delete(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_user_id(raw: String) -> Result<UserId, UserError> {
    Ok(UserId::new(raw)?)
}

/// User directory error as an HTTP response.
#[derive(Debug)]
pub struct UserApiError(UserError);

impl From<UserError> for UserApiError {
    fn from(err: UserError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        let message = match &self.0 {
            UserError::NotFound(_) => "User not found".to_string(),
            other => other.to_string(),
        };
        error_response(self.0.code(), message)
    }
}
