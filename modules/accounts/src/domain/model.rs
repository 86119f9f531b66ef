use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected USER or ADMIN")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A stored account. `password_hash` stays inside the domain layer.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub activate: bool,
    pub profile: Option<Profile>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("activate", &self.activate)
            .field("profile", &self.profile)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fields: ProfileFields,
}

/// Optional profile attributes. As a patch, `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub phone_number: Option<String>,
    pub current_location: Option<String>,
}

impl ProfileFields {
    /// Overwrites every field that `patch` carries.
    pub fn merge(&mut self, patch: Self) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.email, patch.email);
        take(&mut self.name, patch.name);
        take(&mut self.picture, patch.picture);
        take(&mut self.gender, patch.gender);
        take(&mut self.address, patch.address);
        take(&mut self.birthday, patch.birthday);
        take(&mut self.phone_number, patch.phone_number);
        take(&mut self.current_location, patch.current_location);
    }

    /// Profile email falls back to the account email.
    #[must_use]
    pub fn with_default_email(mut self, account_email: &str) -> Self {
        if self.email.is_none() {
            self.email = Some(account_email.to_owned());
        }
        self
    }
}

/// Insert payload for a user and its profile, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: ProfileFields,
}

/// Sparse change to an existing user and its profile.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub activate: Option<bool>,
    pub profile: ProfileFields,
}
