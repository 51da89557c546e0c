//! Application state management

use std::sync::Arc;

use crate::storage::UploadStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Presigned-upload storage client, safe for concurrent use
    pub storage: Arc<UploadStorage>,
}
