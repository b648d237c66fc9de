//! Video service: keeps metadata rows and stored files in step.

use std::path::PathBuf;

use tokio::io::AsyncRead;

use super::metadata::{NewVideo, VideoRecord, VideoRepository};
use super::storage::FileStorage;
use super::validation::validate_extension;
use crate::db::DbPool;
use crate::{Result, VidshelfError};

/// A metadata row together with the resolved on-disk location of its file.
#[derive(Debug, Clone)]
pub struct StoredVideo {
    /// Metadata row.
    pub record: VideoRecord,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// Orchestrates uploads, downloads, deletes and listings.
///
/// Each call is self-contained; the service holds only borrowed handles.
pub struct VideoService<'a> {
    repo: VideoRepository<'a>,
    storage: &'a FileStorage,
}

impl<'a> VideoService<'a> {
    /// Create a new VideoService.
    pub fn new(pool: &'a DbPool, storage: &'a FileStorage) -> Self {
        Self {
            repo: VideoRepository::new(pool),
            storage,
        }
    }

    /// Look up a video and make sure its file is still on disk.
    pub async fn fetch(&self, id: i64) -> Result<StoredVideo> {
        let record = self.find_record(id).await?;
        let path = self.resolve_file(&record).await?;
        Ok(StoredVideo { record, path })
    }

    /// Fetch a video, check its extension and load its content.
    pub async fn download(&self, id: i64) -> Result<(VideoRecord, Vec<u8>)> {
        let stored = self.fetch(id).await?;
        validate_extension(&stored.record.name)?;

        let content = self.storage.read_path(&stored.path).await?;
        tracing::info!(file_id = id, name = %stored.record.name, size_bytes = content.len(), "Video downloaded");

        Ok((stored.record, content))
    }

    /// List every video in storage order.
    pub async fn list(&self) -> Result<Vec<VideoRecord>> {
        self.repo.list_all().await
    }

    /// Store a new video and return its row together with the absolute
    /// path it was written to.
    ///
    /// The metadata row is committed before the content is written. If the
    /// write fails, the row is removed again so no record points at a
    /// missing file.
    pub async fn upload<R>(&self, file_name: &str, size: i64, reader: R) -> Result<StoredVideo>
    where
        R: AsyncRead + Unpin,
    {
        validate_extension(file_name)?;
        let path = self.storage.get_file_path(file_name)?;

        if self.storage.exists(file_name).await? {
            return Err(VidshelfError::already_exists(file_name));
        }

        let record = self.repo.create(&NewVideo::new(file_name, size)).await?;

        if let Err(e) = self.storage.write(file_name, reader).await {
            if let Err(cleanup) = self.repo.delete(&record).await {
                tracing::warn!(file_id = record.id, error = %cleanup, "Failed to remove orphaned video row");
            }
            return Err(e);
        }

        tracing::info!(file_id = record.id, name = %file_name, size_bytes = size, "Video uploaded");
        Ok(StoredVideo { record, path })
    }

    /// Remove a video's row and then its file.
    ///
    /// The row stays removed even if the file turns out to be missing or
    /// cannot be deleted.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let record = self.find_record(id).await?;

        self.repo.delete(&record).await?;
        self.storage.delete(&record.name).await?;

        tracing::info!(file_id = id, name = %record.name, "Video deleted");
        Ok(())
    }

    async fn find_record(&self, id: i64) -> Result<VideoRecord> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| VidshelfError::no_file_for_id(id))
    }

    async fn resolve_file(&self, record: &VideoRecord) -> Result<PathBuf> {
        let path = self.storage.get_file_path(&record.name)?;
        if !self.storage.exists(&record.name).await? {
            return Err(VidshelfError::missing_file(&record.name));
        }
        Ok(path)
    }
}
