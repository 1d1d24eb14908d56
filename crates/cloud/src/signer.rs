//! Presigned-upload signing against an external object store.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Error type for signing failures.
///
/// The API maps these to 503 — the signer is the one externally-latent,
/// fail-fast dependency in the upload path.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("Failed to presign upload: {0}")]
    Presign(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

/// The signer's result payload, returned verbatim to the client.
///
/// `signed_url` is the PUT target the client uses to place the binary;
/// `url` is the durable public location persisted on the image record.
#[derive(Debug, Clone, Serialize)]
pub struct SignedUpload {
    pub key: String,
    pub url: String,
    pub signed_url: String,
}

/// A capability that exchanges a storage key for a signed upload target.
///
/// Implemented by [`S3Signer`] in production and by in-memory fakes in
/// tests.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    async fn sign(
        &self,
        bucket: &str,
        file_type: &str,
        key: &str,
    ) -> Result<SignedUpload, SignError>;
}

/// Default expiry for presigned PUT URLs.
const PRESIGN_EXPIRY: Duration = Duration::from_secs(300);

/// S3-backed [`UploadSigner`] using the AWS SDK's presigning support.
pub struct S3Signer {
    client: aws_sdk_s3::Client,
    expiry: Duration,
}

impl S3Signer {
    /// Build a signer from ambient AWS configuration (env vars, profile,
    /// or instance metadata).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            expiry: PRESIGN_EXPIRY,
        }
    }
}

#[async_trait]
impl UploadSigner for S3Signer {
    async fn sign(
        &self,
        bucket: &str,
        file_type: &str,
        key: &str,
    ) -> Result<SignedUpload, SignError> {
        use aws_sdk_s3::presigning::PresigningConfig;

        let presigning = PresigningConfig::expires_in(self.expiry)
            .map_err(|e| SignError::Config(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(file_type)
            .presigned(presigning)
            .await
            .map_err(|e| SignError::Presign(e.to_string()))?;

        Ok(SignedUpload {
            key: key.to_string(),
            url: format!("https://{bucket}.s3.amazonaws.com/{key}"),
            signed_url: presigned.uri().to_string(),
        })
    }
}
