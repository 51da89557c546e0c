//! S3-backed presigned upload operations

mod error;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};

pub use error::{StorageError, StorageResult};

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUpload {
    /// The presigned URL authorizing a single PUT of the object
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Storage client that issues presigned upload URLs for one bucket
pub struct UploadStorage {
    s3_client: Arc<S3Client>,
    bucket: String,
    key_prefix: String,
    presign_expiry_secs: u64,
}

impl UploadStorage {
    /// Creates a new upload storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket` - S3 bucket name the grants are scoped to
    /// * `key_prefix` - Prefix distinguishing this service's objects within the bucket
    /// * `presign_expiry_secs` - Validity window for presigned URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket: String,
        key_prefix: String,
        presign_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket,
            key_prefix,
            presign_expiry_secs,
        }
    }

    /// Maps a file name and an epoch-millisecond timestamp to an object key
    #[must_use]
    pub fn map_file_name_to_key(key_prefix: &str, file_name: &str, epoch_millis: i64) -> String {
        format!("{key_prefix}{epoch_millis}-{file_name}")
    }

    /// Derives a fresh object key for the given file name.
    ///
    /// Keys are practically unique: two requests for the same file name
    /// landing within the same millisecond produce the same key. No
    /// collision detection is performed.
    #[must_use]
    pub fn object_key(&self, file_name: &str) -> String {
        Self::map_file_name_to_key(&self.key_prefix, file_name, Utc::now().timestamp_millis())
    }

    /// Generates a presigned URL for a PUT of `key` with the declared content type
    ///
    /// # Returns
    ///
    /// A `PresignedUpload` struct containing the URL and expiration time
    ///
    /// # Errors
    ///
    /// Returns `StorageError::S3Error` if presigned URL generation fails
    /// Returns `StorageError::ConfigError` if presigning config creation fails
    pub async fn presign_put(&self, key: &str, content_type: &str) -> StorageResult<PresignedUpload> {
        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(self.presign_expiry_secs)).map_err(
                |e| StorageError::ConfigError(format!("Failed to create presigning config: {e}")),
            )?;

        let presigned_url = self
            .s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigned_config)
            .await
            .map_err(|e| StorageError::S3Error(format!("Failed to generate presigned URL: {e}")))?;

        let expires_at: DateTime<Utc> =
            Utc::now() + Duration::from_secs(self.presign_expiry_secs);

        Ok(PresignedUpload {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }
}
