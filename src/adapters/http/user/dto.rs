//! Request shapes for user directory endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Role;
use crate::ports::UserFilter;

/// Query string of `GET /api/admin/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl From<UserQuery> for UserFilter {
    fn from(query: UserQuery) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        UserFilter {
            email: non_blank(query.email),
            city: non_blank(query.city),
        }
    }
}

/// Body of `PATCH /api/admin/users/:id/role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}
