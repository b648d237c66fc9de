//! Web API module for Vidshelf.
//!
//! This module provides the REST API for uploading, downloading, listing and
//! deleting video files.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_app, create_router};
pub use server::WebServer;
