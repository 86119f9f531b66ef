use sea_orm::ActiveValue::Set;

use super::entity::{profile, user};
use crate::domain::error::DomainError;
use crate::domain::model::{Profile, ProfileFields, Role, User};

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            fields: ProfileFields {
                email: m.email,
                name: m.name,
                picture: m.picture,
                gender: m.gender,
                address: m.address,
                birthday: m.birthday,
                phone_number: m.phone_number,
                current_location: m.current_location,
            },
        }
    }
}

pub fn user_from_models(
    user: user::Model,
    profile: Option<profile::Model>,
) -> Result<User, DomainError> {
    let role = user.role.parse::<Role>().map_err(DomainError::internal)?;
    Ok(User {
        id: user.id,
        email: user.email,
        password_hash: user.password,
        role,
        activate: user.activate,
        profile: profile.map(Into::into),
    })
}

/// Writes every field the patch carries into the active model.
pub fn apply_profile_patch(am: &mut profile::ActiveModel, patch: ProfileFields) {
    let ProfileFields {
        email,
        name,
        picture,
        gender,
        address,
        birthday,
        phone_number,
        current_location,
    } = patch;
    if let Some(v) = email {
        am.email = Set(Some(v));
    }
    if let Some(v) = name {
        am.name = Set(Some(v));
    }
    if let Some(v) = picture {
        am.picture = Set(Some(v));
    }
    if let Some(v) = gender {
        am.gender = Set(Some(v));
    }
    if let Some(v) = address {
        am.address = Set(Some(v));
    }
    if let Some(v) = birthday {
        am.birthday = Set(Some(v));
    }
    if let Some(v) = phone_number {
        am.phone_number = Set(Some(v));
    }
    if let Some(v) = current_location {
        am.current_location = Set(Some(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn unknown_stored_role_is_internal() {
        let model = user::Model {
            id: Uuid::nil(),
            email: "a@b.c".to_owned(),
            password: "x".to_owned(),
            role: "GUEST".to_owned(),
            activate: true,
        };
        assert!(matches!(
            user_from_models(model, None),
            Err(DomainError::Internal(_))
        ));
    }

    #[test]
    fn maps_profile_columns_into_fields() {
        let user_id = Uuid::now_v7();
        let model = user::Model {
            id: user_id,
            email: "a@b.c".to_owned(),
            password: "x".to_owned(),
            role: "ADMIN".to_owned(),
            activate: false,
        };
        let profile = profile::Model {
            id: Uuid::now_v7(),
            user_id,
            email: Some("a@b.c".to_owned()),
            name: Some("An".to_owned()),
            picture: None,
            gender: Some("female".to_owned()),
            address: None,
            birthday: None,
            phone_number: None,
            current_location: None,
        };
        let user = user_from_models(model, Some(profile)).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(
            user.profile.unwrap().fields.gender.as_deref(),
            Some("female")
        );
    }

    #[test]
    fn patch_leaves_unset_columns_untouched() {
        let mut am = profile::ActiveModel::default();
        apply_profile_patch(
            &mut am,
            ProfileFields {
                name: Some("Binh".to_owned()),
                ..ProfileFields::default()
            },
        );
        assert_eq!(am.name, Set(Some("Binh".to_owned())));
        assert!(am.address.is_not_set());
    }
}
