//! Two-phase image upload coordination.
//!
//! Phase one asks the external signer for a presigned PUT target; phase
//! two records the resulting image at the head of the page's newest-first
//! image list with a single insert. The binary itself is transferred by
//! the client, outside this process. A crash between the phases leaves a
//! signed URL with no image record, which is acceptable — nothing
//! references the orphaned key.

use sqlx::PgPool;

use qboard_core::error::CoreError;
use qboard_core::storage::topic_image_key;
use qboard_core::types::DbId;
use qboard_db::repositories::ImageRepo;

use crate::signer::{SignedUpload, UploadSigner};

/// Drives the signed-upload handshake and persists image metadata.
pub struct ImageUploadCoordinator;

impl ImageUploadCoordinator {
    /// Request an upload target for a new page image.
    ///
    /// On signer failure nothing is persisted and the caller receives
    /// [`CoreError::Unavailable`]. On success the image record exists
    /// before the signer payload is returned.
    pub async fn request_upload(
        pool: &PgPool,
        signer: &dyn UploadSigner,
        bucket: &str,
        page_id: DbId,
        user_id: DbId,
        file_type: &str,
    ) -> Result<SignedUpload, CoreError> {
        let key = topic_image_key();

        let signed = signer.sign(bucket, file_type, &key).await.map_err(|err| {
            tracing::warn!(error = %err, page_id, "Upload signer failed");
            CoreError::Unavailable("There was a problem getting a signed url".to_string())
        })?;

        ImageRepo::prepend(pool, page_id, user_id, &signed.url)
            .await
            .map_err(|err| CoreError::Internal(format!("Failed to record image: {err}")))?;

        Ok(signed)
    }
}
