//! User profile aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

/// City recorded when a user has not given one.
pub const UNKNOWN_CITY: &str = "unknown";

/// Fields a user may edit on their own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ProfileDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            city: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Trims every field, drops a blank email and validates what is left.
    fn normalize(self) -> Result<(String, Option<String>, String), ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let email = self
            .email
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty());
        if let Some(email) = &email {
            let well_formed = email
                .split_once('@')
                .map_or(false, |(local, domain)| !local.is_empty() && domain.contains('.'))
                && !email.contains(char::is_whitespace);
            if !well_formed {
                return Err(ValidationError::invalid_format(
                    "email",
                    format!("'{}' is not an email address", email),
                ));
            }
        }

        let city = self
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty())
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        Ok((name, email, city))
    }
}

/// A directory entry for one user.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `email`, when present, is lowercase and has a local part and a dotted domain
/// - `city` is never blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: UserId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    city: String,
    role: Role,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl UserProfile {
    /// First profile for a token holder. The role is whatever the login
    /// service granted.
    pub fn register(id: UserId, role: Role, details: ProfileDetails) -> Result<Self, ValidationError> {
        let (name, email, city) = details.normalize()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            email,
            city,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a profile from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        name: String,
        email: Option<String>,
        city: String,
        role: Role,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            city,
            role,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the self-editable fields. The role is untouched.
    pub fn update(&mut self, details: ProfileDetails) -> Result<(), ValidationError> {
        let (name, email, city) = details.normalize()?;
        self.name = name;
        self.email = email;
        self.city = city;
        self.touch();
        Ok(())
    }

    /// Returns `false` when the user already had `role`.
    pub fn set_role(&mut self, role: Role) -> bool {
        if self.role == role {
            return false;
        }
        self.role = role;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = self.updated_at.advance_from(Timestamp::now());
    }
}
