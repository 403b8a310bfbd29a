//! HTTP adapter for the user directory.
//!
//! - `GET /api/users/me` - The caller's profile
//! - `PUT /api/users/me` - Create or edit the caller's profile
//! - `GET /api/admin/users` - List users, filtered by `email` / `city` (admin)
//! - `GET /api/admin/users/:id` - One user (admin)
//! - `PATCH /api/admin/users/:id/role` - Grant or revoke admin (admin)
//! - `DELETE /api/admin/users/:id` - Remove a user (admin, 204)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{UserApiError, UserAppState};
pub use routes::{admin_user_routes, profile_routes, user_router};
