use async_trait::async_trait;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{NewUser, Profile, ProfileFields, User, UserChanges};

/// Persistence port for users and their profiles.
///
/// Users are always returned with their profile loaded. Lookups that miss
/// return `Ok(None)`; a duplicate email on insert is `DomainError::EmailTaken`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Inserts the user and its profile atomically.
    async fn insert(&self, new: NewUser) -> Result<User, DomainError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, DomainError>;

    /// Deletes the user together with its profile.
    async fn delete(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, DomainError>;

    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfileFields,
    ) -> Result<Option<Profile>, DomainError>;
}
