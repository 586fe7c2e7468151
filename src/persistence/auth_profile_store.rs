use crate::app_env::AppConfig;
use crate::domain;
use crate::domain::profile::UserProfile;
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error, bail};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Driven adapter for profile metadata, backed by the identity provider's
/// admin REST API. The provider owns user records; this service only reads and
/// replaces the free-form metadata bag on them.
pub struct AuthProfileStore {
    base_url: String,
    api_key: String,
}

impl AuthProfileStore {
    pub fn new(config: &AppConfig) -> Self {
        AuthProfileStore {
            base_url: config.auth_api_url.clone(),
            api_key: config.service_role_key.clone(),
        }
    }

    fn user_url(&self, user_id: Uuid) -> String {
        format!("{}/admin/users/{}", self.base_url, user_id)
    }
}

#[derive(Deserialize)]
struct AuthUser {
    user_metadata: Option<ProfileMetadata>,
}

#[derive(Serialize, Deserialize)]
struct ProfileMetadata {
    username: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Serialize)]
struct MetadataUpdate {
    user_metadata: ProfileMetadata,
}

impl From<ProfileMetadata> for UserProfile {
    fn from(value: ProfileMetadata) -> Self {
        UserProfile {
            username: value.username,
            avatar_url: value.avatar_url,
        }
    }
}

impl domain::profile::driven_ports::ProfileStore for AuthProfileStore {
    async fn fetch_profile(
        &self,
        user_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<UserProfile>, Error> {
        let response = ext_cxn
            .http_client()
            .get(self.user_url(user_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("fetching a user from the identity provider")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!(
                "the identity provider rejected the user lookup ({})",
                response.status()
            );
        }

        let user: AuthUser = response
            .json()
            .await
            .context("decoding an identity provider user record")?;

        Ok(user.user_metadata.map(UserProfile::from))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: &UserProfile,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let update = MetadataUpdate {
            user_metadata: ProfileMetadata {
                username: profile.username.clone(),
                avatar_url: profile.avatar_url.clone(),
            },
        };

        let response = ext_cxn
            .http_client()
            .put(self.user_url(user_id))
            .bearer_auth(&self.api_key)
            .json(&update)
            .send()
            .await
            .context("updating user metadata at the identity provider")?;
        if !response.status().is_success() {
            bail!(
                "the identity provider rejected the metadata update ({})",
                response.status()
            );
        }

        Ok(())
    }
}
