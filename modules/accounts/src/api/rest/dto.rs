use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Profile, ProfileFields, Role, User};
use crate::domain::service::{Registration, UserUpsert};

/// Account as returned to clients. There is deliberately no password field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub activate: bool,
    pub profile: Option<ProfileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub phone_number: Option<String>,
    pub current_location: Option<String>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role.to_string(),
            activate: u.activate,
            profile: u.profile.map(Into::into),
        }
    }
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        let f = p.fields;
        Self {
            id: p.id,
            user_id: p.user_id,
            email: f.email,
            name: f.name,
            picture: f.picture,
            gender: f.gender,
            address: f.address,
            birthday: f.birthday,
            phone_number: f.phone_number,
            current_location: f.current_location,
        }
    }
}

/// Gender arrives either as a plain string or as a select widget `{ "value": ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenderInput {
    Plain(String),
    Select { value: String },
}

impl GenderInput {
    fn into_value(self) -> String {
        match self {
            Self::Plain(v) | Self::Select { value: v } => v,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub gender: Option<GenderInput>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub phone_number: Option<String>,
    pub current_location: Option<String>,
}

impl From<ProfileInput> for ProfileFields {
    fn from(p: ProfileInput) -> Self {
        Self {
            email: p.email,
            name: p.name,
            picture: p.picture,
            gender: p.gender.map(GenderInput::into_value),
            address: p.address,
            birthday: p.birthday,
            phone_number: p.phone_number,
            current_location: p.current_location,
        }
    }
}

/// Body of `/api/register` and `/api/login-google`.
///
/// Request bodies carrying a password do not implement `Debug`.
#[derive(Default, Deserialize)]
pub struct RegisterReq {
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<ProfileInput>,
}

#[derive(Default, Deserialize)]
pub struct LoginReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Default, Deserialize)]
pub struct UpsertUserReq {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub profile: Option<ProfileInput>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ActivationReq {
    pub activate: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileReq {
    pub profile: Option<ProfileInput>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::validation(field, "is required"))
}

impl TryFrom<RegisterReq> for Registration {
    type Error = DomainError;

    fn try_from(req: RegisterReq) -> Result<Self, Self::Error> {
        Ok(Self {
            email: required(req.email, "email")?,
            password: SecretString::from(required(req.password, "password")?),
            profile: req.profile.unwrap_or_default().into(),
        })
    }
}

impl LoginReq {
    /// # Errors
    /// Missing email or password is a validation error.
    pub fn into_parts(self) -> Result<(String, SecretString), DomainError> {
        Ok((
            required(self.email, "email")?,
            SecretString::from(required(self.password, "password")?),
        ))
    }
}

impl TryFrom<UpsertUserReq> for UserUpsert {
    type Error = DomainError;

    fn try_from(req: UpsertUserReq) -> Result<Self, Self::Error> {
        let role = req
            .role
            .map(|r| r.parse::<Role>())
            .transpose()
            .map_err(|e| DomainError::validation("role", e.to_string()))?;
        Ok(Self {
            email: required(req.email, "email")?,
            password: req.password.map(SecretString::from),
            role,
            profile: req.profile.unwrap_or_default().into(),
        })
    }
}
