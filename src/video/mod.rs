//! Video file management for Vidshelf.
//!
//! This module provides:
//! - Extension allow-list validation
//! - Video metadata persistence
//! - Flat file storage under one base directory
//! - The service that keeps rows and files consistent

mod metadata;
mod service;
mod storage;
mod validation;

pub use metadata::{NewVideo, VideoRecord, VideoRepository};
pub use service::{StoredVideo, VideoService};
pub use storage::FileStorage;
pub use validation::{extract_extension, validate_extension, SUPPORTED_EXTENSIONS};
