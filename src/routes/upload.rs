use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use validator::{Validate, ValidationError};

use crate::{
    state::AppState,
    types::{AppError, ValidatedJson},
};

fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    let mut invalid = ValidationError::new("invalid_file_name");
    if file_name.contains(['/', '\\']) || file_name.contains("..") {
        invalid.message = Some("fileName must not contain path separators".into());
        return Err(invalid);
    }
    if file_name.chars().any(char::is_control) {
        invalid.message = Some("fileName must not contain control characters".into());
        return Err(invalid);
    }
    Ok(())
}

fn validate_file_type(file_type: &str) -> Result<(), ValidationError> {
    if file_type.parse::<mime::Mime>().is_err() {
        let mut invalid = ValidationError::new("invalid_file_type");
        invalid.message = Some("fileType must be a valid MIME type".into());
        return Err(invalid);
    }
    Ok(())
}

/// Upload grant request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Name of the file the client intends to upload; becomes the key suffix
    #[validate(
        length(min = 1, max = 1024, message = "fileName must be a non-empty string"),
        custom(function = "validate_file_name")
    )]
    pub file_name: String,
    /// Declared MIME type the grant is bound to
    #[validate(
        length(min = 1, message = "fileType must be a non-empty string"),
        custom(function = "validate_file_type")
    )]
    pub file_type: String,
}

/// Upload grant response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    /// Presigned URL authorizing exactly one PUT of the object
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    /// Object key the URL is bound to
    pub file_key: String,
}

/// Issues a time-limited presigned upload URL
///
/// Derives an object key from the file name and the current
/// epoch-millisecond timestamp, then asks the storage layer to sign a PUT
/// of that key with the declared content type. The service itself never
/// touches the file bytes and records nothing about the issued key.
///
/// # Errors
///
/// Returns a 500 with a generic message when signing fails; the underlying
/// error stays in server-side logs. Validation failures are rejected with
/// 400 before this handler runs.
#[instrument(skip(state, payload))]
pub async fn create_upload_grant(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UploadRequest>,
) -> Result<Json<UploadGrant>, AppError> {
    let file_key = state.storage.object_key(&payload.file_name);
    debug!(%file_key, "generating presigned upload URL");

    let presigned = state
        .storage
        .presign_put(&file_key, &payload.file_type)
        .await?;

    info!(%file_key, expires_at = %presigned.expires_at, "issued upload grant");

    Ok(Json(UploadGrant {
        upload_url: presigned.url,
        file_key,
    }))
}
