use uuid::Uuid;

/// Free-form display metadata carried on an identity-provider user
#[derive(PartialEq, Eq, Debug, Default)]
#[cfg_attr(test, derive(Clone))]
pub struct UserProfile {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

pub mod driven_ports {
    use super::*;
    use crate::domain::FileUpload;
    use crate::external_connections::ExternalConnectivity;

    /// Reads and writes profile metadata through the identity provider
    pub trait ProfileStore {
        async fn fetch_profile(
            &self,
            user_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<UserProfile>, anyhow::Error>;

        /// Whole-metadata write, mirroring the identity provider's
        /// replace-the-bag update semantics
        async fn update_profile(
            &self,
            user_id: Uuid,
            profile: &UserProfile,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }

    pub trait AvatarStore {
        /// Stores avatar bytes under the user's ID, returning the public URL.
        /// Re-uploads intentionally overwrite the previous avatar.
        async fn store_avatar(
            &self,
            user_id: Uuid,
            upload: &FileUpload,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<String, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::domain::FileUpload;
    use crate::external_connections::ExternalConnectivity;

    pub trait ProfilePort {
        async fn profile_for_user(
            &self,
            user_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
            profiles: &impl driven_ports::ProfileStore,
        ) -> Result<UserProfile, anyhow::Error>;

        async fn update_profile(
            &self,
            user_id: Uuid,
            profile: &UserProfile,
            ext_cxn: &mut impl ExternalConnectivity,
            profiles: &impl driven_ports::ProfileStore,
        ) -> Result<(), anyhow::Error>;

        async fn upload_avatar(
            &self,
            user_id: Uuid,
            upload: &FileUpload,
            ext_cxn: &mut impl ExternalConnectivity,
            avatars: &impl driven_ports::AvatarStore,
        ) -> Result<String, anyhow::Error>;
    }
}

use crate::domain::FileUpload;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;

pub struct ProfileService {}

impl driving_ports::ProfilePort for ProfileService {
    async fn profile_for_user(
        &self,
        user_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
        profiles: &impl driven_ports::ProfileStore,
    ) -> Result<UserProfile, anyhow::Error> {
        let profile = profiles
            .fetch_profile(user_id, &mut *ext_cxn)
            .await
            .context("fetching a user profile")?;

        // Users who never saved metadata just get the empty profile
        Ok(profile.unwrap_or_default())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: &UserProfile,
        ext_cxn: &mut impl ExternalConnectivity,
        profiles: &impl driven_ports::ProfileStore,
    ) -> Result<(), anyhow::Error> {
        profiles
            .update_profile(user_id, profile, &mut *ext_cxn)
            .await
            .context("updating a user profile")?;

        Ok(())
    }

    async fn upload_avatar(
        &self,
        user_id: Uuid,
        upload: &FileUpload,
        ext_cxn: &mut impl ExternalConnectivity,
        avatars: &impl driven_ports::AvatarStore,
    ) -> Result<String, anyhow::Error> {
        let avatar_url = avatars
            .store_avatar(user_id, upload, &mut *ext_cxn)
            .await
            .context("storing an avatar in the object store")?;

        Ok(avatar_url)
    }
}
