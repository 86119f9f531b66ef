use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::login::LoginState;
use super::model::{NewUser, Profile, ProfileFields, Role, User, UserChanges};
use super::password::PasswordHasher;
use super::repo::UsersRepository;

/// Credentials plus the profile a new account starts with.
#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    pub profile: ProfileFields,
}

/// Admin create-or-update keyed by email.
#[derive(Debug)]
pub struct UserUpsert {
    pub email: String,
    pub password: Option<SecretString>,
    pub role: Option<Role>,
    pub profile: ProfileFields,
}

pub struct Service {
    repo: Arc<dyn UsersRepository>,
    hasher: PasswordHasher,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        let email = required_email(registration.email)?;
        if self.repo.find_by_email(&email).await?.is_some() {
            warn!("registration for an existing email");
            return Err(DomainError::EmailTaken(email));
        }
        let password_hash = self.hasher.hash(registration.password).await?;
        let profile = registration.profile.with_default_email(&email);
        let user = self
            .repo
            .insert(NewUser {
                email,
                password_hash,
                role: Role::User,
                profile,
            })
            .await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<User, DomainError> {
        let email = required_email(email.to_owned())?;
        let state = LoginState::Unauthenticated.locate(self.repo.find_by_email(&email).await?);
        let state = match state.pending_digest().map(str::to_owned) {
            Some(digest) => {
                let matches = self.hasher.verify(password, digest).await?;
                state.check_password(matches)
            }
            None => state,
        };
        match state.finish() {
            Ok(user) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user)
            }
            Err(e) => {
                warn!(reason = %e, "login rejected");
                Err(e)
            }
        }
    }

    /// Upserts the account from a Google sign-in, then refuses deactivated accounts.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn login_google(&self, registration: Registration) -> Result<User, DomainError> {
        let user = self
            .upsert(UserUpsert {
                email: registration.email,
                password: Some(registration.password),
                role: None,
                profile: registration.profile,
            })
            .await?;
        if !user.activate {
            warn!(user_id = %user.id, "google login for a deactivated account");
            return Err(DomainError::Deactivated);
        }
        Ok(user)
    }

    #[instrument(skip_all, fields(email = %upsert.email))]
    pub async fn upsert(&self, upsert: UserUpsert) -> Result<User, DomainError> {
        let email = required_email(upsert.email)?;
        let password_hash = match upsert.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };
        let profile = upsert.profile.with_default_email(&email);

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            let changes = UserChanges {
                password_hash,
                role: upsert.role,
                activate: None,
                profile,
            };
            let user = self
                .repo
                .update(existing.id, changes)
                .await?
                .ok_or_else(|| DomainError::user_not_found(existing.id))?;
            info!(user_id = %user.id, "user updated");
            return Ok(user);
        }

        let Some(password_hash) = password_hash else {
            return Err(DomainError::validation(
                "password",
                "is required when creating a user",
            ));
        };
        let user = self
            .repo
            .insert(NewUser {
                email,
                password_hash,
                role: upsert.role.unwrap_or_default(),
                profile,
            })
            .await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    #[instrument(skip(self))]
    pub async fn set_activation(&self, id: Uuid, activate: bool) -> Result<User, DomainError> {
        let changes = UserChanges {
            activate: Some(activate),
            ..UserChanges::default()
        };
        let user = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        info!(user_id = %id, activate, "user activation changed");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<User, DomainError> {
        let user = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        info!(user_id = %id, "user deleted");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        self.repo.list_profiles().await
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, id: Uuid) -> Result<Profile, DomainError> {
        self.repo
            .find_profile(id)
            .await?
            .ok_or(DomainError::ProfileNotFound(id))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfileFields,
    ) -> Result<Profile, DomainError> {
        let profile = self
            .repo
            .update_profile(id, patch)
            .await?
            .ok_or(DomainError::ProfileNotFound(id))?;
        info!(profile_id = %id, "profile updated");
        Ok(profile)
    }
}

fn required_email(email: String) -> Result<String, DomainError> {
    let email = email.trim().to_owned();
    if email.is_empty() {
        return Err(DomainError::validation("email", "is required"));
    }
    if !email.contains('@') {
        return Err(DomainError::validation("email", "is not an email address"));
    }
    Ok(email)
}
