//! API handlers for the Vidshelf HTTP API.

pub mod video;

pub use video::*;

use std::sync::Arc;

use crate::db::Database;
use crate::video::FileStorage;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database holding the video metadata.
    pub db: Arc<Database>,
    /// Storage for uploaded files.
    pub storage: FileStorage,
    /// Maximum upload body size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>, storage: FileStorage, max_upload_size: u64) -> Self {
        Self {
            db,
            storage,
            max_upload_size,
        }
    }
}
