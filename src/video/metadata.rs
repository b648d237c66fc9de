//! Video metadata types and repository.

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::serialize_timestamp;
use crate::db::DbPool;
use crate::{Result, VidshelfError};

/// Metadata row for an uploaded video.
///
/// Serialized as `{"file_id", "name", "size", "created_at"}` with
/// `created_at` in `YYYY-MM-DD HH:MM:SS` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct VideoRecord {
    /// Unique file ID.
    #[serde(rename = "file_id")]
    #[schema(example = 1)]
    pub id: i64,
    /// Original filename, also the on-disk filename.
    #[schema(example = "holiday.mp4")]
    pub name: String,
    /// File size in bytes.
    #[schema(example = 1827382)]
    pub size: i64,
    /// When the file was uploaded (UTC).
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, example = "2022-12-11 10:38:11")]
    pub created_at: NaiveDateTime,
}

/// Data for creating a new metadata row.
#[derive(Debug, Clone)]
pub struct NewVideo {
    /// Original filename.
    pub name: String,
    /// File size in bytes.
    pub size: i64,
}

impl NewVideo {
    /// Create a new NewVideo.
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Repository for video metadata operations.
pub struct VideoRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> VideoRepository<'a> {
    /// Create a new VideoRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new row. The database assigns the ID and creation timestamp.
    pub async fn create(&self, video: &NewVideo) -> Result<VideoRecord> {
        let result = sqlx::query("INSERT INTO videos (name, size) VALUES (?, ?)")
            .bind(&video.name)
            .bind(video.size)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| VidshelfError::Database(format!("inserted video {id} vanished")))
    }

    /// Get a video by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<VideoRecord>> {
        let video = sqlx::query_as::<_, VideoRecord>(
            "SELECT id, name, size, created_at FROM videos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(video)
    }

    /// List every video in storage order (ascending ID).
    pub async fn list_all(&self) -> Result<Vec<VideoRecord>> {
        let videos = sqlx::query_as::<_, VideoRecord>(
            "SELECT id, name, size, created_at FROM videos ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(videos)
    }

    /// Delete the row backing `video`.
    ///
    /// Returns true if a row was deleted, false if it was already gone.
    pub async fn delete(&self, video: &VideoRecord) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = ?")
            .bind(video.id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all rows.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_video() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        let video = repo.create(&NewVideo::new("test.mp4", 1024)).await.unwrap();

        assert_eq!(video.id, 1);
        assert_eq!(video.name, "test.mp4");
        assert_eq!(video.size, 1024);
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        let first = repo.create(&NewVideo::new("a.mp4", 1)).await.unwrap();
        let second = repo.create(&NewVideo::new("b.mp4", 2)).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_create_allows_duplicate_names() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        repo.create(&NewVideo::new("same.mp4", 1)).await.unwrap();
        repo.create(&NewVideo::new("same.mp4", 2)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        let created = repo.create(&NewVideo::new("clip.mpg", 99)).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_in_storage_order() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        for name in ["test1.mp4", "test2.mpg4", "test3.mpg", "test4.mpeg"] {
            repo.create(&NewVideo::new(name, 10)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, ["test1.mp4", "test2.mpg4", "test3.mpg", "test4.mpeg"]);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let repo = VideoRepository::new(db.pool());

        let video = repo.create(&NewVideo::new("gone.mp4", 5)).await.unwrap();

        assert!(repo.delete(&video).await.unwrap());
        assert!(repo.get_by_id(video.id).await.unwrap().is_none());
        assert!(!repo.delete(&video).await.unwrap());
    }

    #[tokio::test]
    async fn test_serialize_record() {
        let db = setup_db().await;
        sqlx::query("INSERT INTO videos (name, size, created_at) VALUES (?, ?, ?)")
            .bind("test2.mpg4")
            .bind(873892_i64)
            .bind("2022-11-10 18:11:29")
            .execute(db.pool())
            .await
            .unwrap();

        let repo = VideoRepository::new(db.pool());
        let video = repo.get_by_id(1).await.unwrap().unwrap();

        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file_id": 1,
                "name": "test2.mpg4",
                "size": 873892,
                "created_at": "2022-11-10 18:11:29"
            })
        );
    }
}
