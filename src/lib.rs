//! Vidshelf - A small video file shelf
//!
//! Upload, download, list and delete video files kept in one directory,
//! with their metadata in SQLite, behind an HTTP API.

pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod video;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, VidshelfError};
pub use video::{FileStorage, VideoRecord, VideoRepository, VideoService};
pub use web::WebServer;
