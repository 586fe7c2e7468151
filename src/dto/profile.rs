use crate::domain::profile::UserProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for a user's display profile
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct ProfileView {
    #[schema(example = "prover")]
    pub username: Option<String>,
    #[schema(example = "https://storage.example.com/object/public/avatars/user.png")]
    pub avatar_url: Option<String>,
}

impl From<UserProfile> for ProfileView {
    fn from(value: UserProfile) -> Self {
        ProfileView {
            username: value.username,
            avatar_url: value.avatar_url,
        }
    }
}

/// DTO for replacing a user's display profile. Fields left null clear the
/// stored value, matching the identity provider's whole-bag update.
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "prover")]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 1024))]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfile> for UserProfile {
    fn from(value: UpdateProfile) -> Self {
        UserProfile {
            username: value.username,
            avatar_url: value.avatar_url,
        }
    }
}

/// DTO returned after an avatar upload succeeds
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct AvatarUploaded {
    #[schema(example = "https://storage.example.com/object/public/avatars/user.png")]
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_null_update_is_valid() {
        let update = UpdateProfile {
            username: None,
            avatar_url: None,
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn empty_username_gets_rejected() {
        let update = UpdateProfile {
            username: Some(String::new()),
            avatar_url: None,
        };
        let validation_result = update.validate();
        assert!(validation_result.is_err());
        let validation_errors = validation_result.unwrap_err();
        assert!(validation_errors.field_errors().contains_key("username"));
    }

    #[test]
    fn update_maps_to_domain_profile() {
        let update = UpdateProfile {
            username: Some("prover".to_owned()),
            avatar_url: None,
        };
        let profile: UserProfile = update.into();
        assert_eq!(Some("prover".to_owned()), profile.username);
        assert!(profile.avatar_url.is_none());
    }
}
