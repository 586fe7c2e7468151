use crate::app_env::AppConfig;
use crate::domain;
use crate::domain::FileUpload;
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error, bail};
use rand::Rng;
use uuid::Uuid;

const EVIDENCE_BUCKET: &str = "evidence";
const AVATARS_BUCKET: &str = "avatars";

/// Driven adapter for the blob object store's REST API. Objects are uploaded
/// by bucket and path, and retrieval happens through a public URL derived from
/// the same path.
pub struct BlobObjectStore {
    base_url: String,
    api_key: String,
}

impl BlobObjectStore {
    pub fn new(config: &AppConfig) -> Self {
        BlobObjectStore {
            base_url: config.storage_api_url.clone(),
            api_key: config.service_role_key.clone(),
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        upload: &FileUpload,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<String, Error> {
        let upload_url = format!("{}/object/{}/{}", self.base_url, bucket, path);
        let mut request = ext_cxn
            .http_client()
            .post(&upload_url)
            .bearer_auth(&self.api_key)
            .body(upload.bytes.clone());
        if let Some(ref content_type) = upload.content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = request
            .send()
            .await
            .context("sending an object to the blob store")?;
        if !response.status().is_success() {
            bail!(
                "the blob store rejected the upload of {bucket}/{path} ({})",
                response.status()
            );
        }

        Ok(format!(
            "{}/object/public/{}/{}",
            self.base_url, bucket, path
        ))
    }
}

impl domain::task::driven_ports::EvidenceStore for BlobObjectStore {
    async fn store_evidence(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        upload: &FileUpload,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<String, Error> {
        // Random suffix so repeated submissions for the same task never
        // overwrite each other
        let suffix: u32 = rand::thread_rng().r#gen();
        let path = format!(
            "{}/{}-{:08x}.{}",
            owner_id,
            task_id,
            suffix,
            upload.extension()
        );

        self.upload_object(EVIDENCE_BUCKET, &path, upload, ext_cxn)
            .await
    }
}

impl domain::profile::driven_ports::AvatarStore for BlobObjectStore {
    async fn store_avatar(
        &self,
        user_id: Uuid,
        upload: &FileUpload,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<String, Error> {
        let path = format!("{}.{}", user_id, upload.extension());

        self.upload_object(AVATARS_BUCKET, &path, upload, ext_cxn)
            .await
    }
}
