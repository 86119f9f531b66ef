//! Login as an explicit state machine.
//!
//! `Unauthenticated` moves to `Located` once the account is found and active,
//! then to `Verified` when the password matches. Any failed check moves to
//! `Rejected`, which is terminal.

use super::error::DomainError;
use super::model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Unknown email or wrong password. Both look the same to the caller.
    InvalidCredentials,
    Deactivated,
}

#[derive(Debug)]
pub enum LoginState {
    Unauthenticated,
    Located(User),
    Verified(User),
    Rejected(Rejection),
}

impl LoginState {
    /// Applies the account lookup result.
    #[must_use]
    pub fn locate(self, found: Option<User>) -> Self {
        match (self, found) {
            (Self::Unauthenticated, None) => Self::Rejected(Rejection::InvalidCredentials),
            (Self::Unauthenticated, Some(user)) if !user.activate => {
                Self::Rejected(Rejection::Deactivated)
            }
            (Self::Unauthenticated, Some(user)) => Self::Located(user),
            (other, _) => other,
        }
    }

    /// Applies the password verification result.
    #[must_use]
    pub fn check_password(self, matches: bool) -> Self {
        match self {
            Self::Located(user) if matches => Self::Verified(user),
            Self::Located(_) => Self::Rejected(Rejection::InvalidCredentials),
            other => other,
        }
    }

    /// Digest of the located account, needed for verification.
    #[must_use]
    pub fn pending_digest(&self) -> Option<&str> {
        match self {
            Self::Located(user) => Some(&user.password_hash),
            _ => None,
        }
    }

    /// # Errors
    /// Every state other than `Verified` is an error.
    pub fn finish(self) -> Result<User, DomainError> {
        match self {
            Self::Verified(user) => Ok(user),
            Self::Rejected(Rejection::Deactivated) => Err(DomainError::Deactivated),
            Self::Rejected(Rejection::InvalidCredentials) => Err(DomainError::InvalidCredentials),
            Self::Unauthenticated | Self::Located(_) => Err(DomainError::internal(
                "login finished before every check ran",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Role;
    use uuid::Uuid;

    fn user(activate: bool) -> User {
        User {
            id: Uuid::nil(),
            email: "lan@example.com".to_owned(),
            password_hash: "digest".to_owned(),
            role: Role::User,
            activate,
            profile: None,
        }
    }

    #[test]
    fn unknown_email_is_rejected_as_invalid_credentials() {
        let state = LoginState::Unauthenticated.locate(None);
        assert!(matches!(state, LoginState::Rejected(Rejection::InvalidCredentials)));
        assert!(matches!(state.finish(), Err(DomainError::InvalidCredentials)));
    }

    #[test]
    fn deactivated_account_is_rejected_before_password_check() {
        let state = LoginState::Unauthenticated.locate(Some(user(false)));
        assert!(state.pending_digest().is_none());
        let state = state.check_password(true);
        assert!(matches!(state.finish(), Err(DomainError::Deactivated)));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let state = LoginState::Unauthenticated
            .locate(Some(user(true)))
            .check_password(false);
        assert!(matches!(state.finish(), Err(DomainError::InvalidCredentials)));
    }

    #[test]
    fn active_account_with_matching_password_is_verified() {
        let state = LoginState::Unauthenticated.locate(Some(user(true)));
        assert_eq!(state.pending_digest(), Some("digest"));
        let verified = state.check_password(true).finish().unwrap();
        assert_eq!(verified.email, "lan@example.com");
    }

    #[test]
    fn rejection_is_terminal() {
        let state = LoginState::Rejected(Rejection::Deactivated)
            .locate(Some(user(true)))
            .check_password(true);
        assert!(matches!(state, LoginState::Rejected(Rejection::Deactivated)));
    }
}
