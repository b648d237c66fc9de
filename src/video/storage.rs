//! File storage for uploaded videos.
//!
//! Every file lives directly under one base directory and keeps the name it
//! was uploaded with:
//! ```text
//! {base_path}/
//! ├── holiday.mp4
//! ├── lecture-01.mpeg
//! └── ...
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::{Result, VidshelfError};

/// File storage service scoped to a single flat directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Absolute base directory.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist and is stored
    /// in absolute form, so [`FileStorage::get_file_path`] always yields an
    /// absolute path.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        let base_path = std::fs::canonicalize(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the full file path for a stored name.
    ///
    /// Names must be a single, normal path segment. Anything that could
    /// leave the base directory (`..`, separators, absolute paths) is
    /// rejected with a validation error.
    pub fn get_file_path(&self, name: &str) -> Result<PathBuf> {
        Self::check_name(name)?;
        Ok(self.base_path.join(name))
    }

    fn check_name(name: &str) -> Result<()> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
            _ => Err(VidshelfError::Validation(format!(
                "file name must be a plain file name: {name:?}"
            ))),
        }
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let path = self.get_file_path(name)?;
        Ok(fs::try_exists(&path).await?)
    }

    /// Write everything `reader` yields to `name`, replacing any existing file.
    ///
    /// Returns the number of bytes written. On failure the partially written
    /// file is removed.
    pub async fn write<R>(&self, name: &str, mut reader: R) -> Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let path = self.get_file_path(name)?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to create file");
            VidshelfError::cannot_write(&path)
        })?;

        let copied = async {
            let written = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            Ok::<u64, io::Error>(written)
        }
        .await;

        match copied {
            Ok(written) => {
                tracing::debug!(path = %path.display(), size_bytes = written, "File written");
                Ok(written)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to write file");
                drop(file);
                let _ = fs::remove_file(&path).await;
                Err(VidshelfError::cannot_write(&path))
            }
        }
    }

    /// Load the content of `name`.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.get_file_path(name)?;
        self.read_path(&path).await
    }

    /// Load the content of a path resolved by [`FileStorage::get_file_path`].
    pub async fn read_path(&self, path: &Path) -> Result<Vec<u8>> {
        match fs::read(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                Err(VidshelfError::missing_file(&name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete `name` from storage.
    ///
    /// A file that is already gone is reported as not found; any other OS
    /// failure (permissions, locks) is an I/O error.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.get_file_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(VidshelfError::missing_file(name)),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to delete file");
                Err(VidshelfError::cannot_delete(name))
            }
        }
    }

    /// Remove every entry of the base directory.
    ///
    /// Returns how many entries were removed. The metadata table is not
    /// consulted.
    pub async fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                fs::remove_dir_all(&path).await?;
            } else {
                fs::remove_file(&path).await?;
            }
            removed += 1;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("upload");

        assert!(!storage_path.exists());

        let storage = FileStorage::new(&storage_path).unwrap();

        assert!(storage_path.exists());
        assert!(storage.base_path().is_absolute());
        assert_eq!(
            storage.base_path(),
            std::fs::canonicalize(&storage_path).unwrap()
        );
    }

    #[test]
    fn test_get_file_path_is_flat() {
        let (_temp_dir, storage) = setup_storage();

        let path = storage.get_file_path("clip.mp4").unwrap();
        assert_eq!(path, storage.base_path().join("clip.mp4"));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_get_file_path_rejects_traversal() {
        let (_temp_dir, storage) = setup_storage();

        for name in ["../clip.mp4", "sub/clip.mp4", "sub\\clip.mp4", "/etc/passwd", "..", ".", ""] {
            let result = storage.get_file_path(name);
            assert!(
                matches!(result, Err(VidshelfError::Validation(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"This is test file.";

        let written = storage.write("test.mp4", &content[..]).await.unwrap();
        assert_eq!(written, content.len() as u64);

        let loaded = storage.read("test.mp4").await.unwrap();
        assert_eq!(loaded, content);
    }

    #[tokio::test]
    async fn test_write_replaces_existing() {
        let (_temp_dir, storage) = setup_storage();

        storage.write("clip.mpg", &b"first version"[..]).await.unwrap();
        storage.write("clip.mpg", &b"second"[..]).await.unwrap();

        assert_eq!(storage.read("clip.mpg").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("upload")).unwrap();
        std::fs::remove_dir(storage.base_path()).unwrap();

        let result = storage.write("clip.mp4", &b"data"[..]).await;
        match result {
            Err(VidshelfError::Io(msg)) => {
                assert!(msg.starts_with("This file cannot be written in this path: "));
                assert!(msg.ends_with("clip.mp4"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.read("nonexistent.mp4").await;
        match result {
            Err(VidshelfError::NotFound(msg)) => {
                assert_eq!(msg, "Cannot find this file: nonexistent.mp4")
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_path_not_found_reports_name() {
        let (_temp_dir, storage) = setup_storage();
        let path = storage.get_file_path("gone.mpeg").unwrap();

        let err = storage.read_path(&path).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot find this file: gone.mpeg");
    }

    #[tokio::test]
    async fn test_exists() {
        let (_temp_dir, storage) = setup_storage();

        storage.write("clip.mp4", &b"data"[..]).await.unwrap();

        assert!(storage.exists("clip.mp4").await.unwrap());
        assert!(!storage.exists("other.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, storage) = setup_storage();

        storage.write("clip.mp4", &b"to delete"[..]).await.unwrap();
        storage.delete("clip.mp4").await.unwrap();

        assert!(!storage.exists("clip.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.delete("nonexistent.mp4").await;
        assert!(matches!(result, Err(VidshelfError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_directory_is_io_error() {
        let (_temp_dir, storage) = setup_storage();
        std::fs::create_dir(storage.base_path().join("folder.mp4")).unwrap();

        let result = storage.delete("folder.mp4").await;
        match result {
            Err(VidshelfError::Io(msg)) => {
                assert_eq!(msg, "This file cannot be deleted: folder.mp4")
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (_temp_dir, storage) = setup_storage();

        storage.write("a.mp4", &b"a"[..]).await.unwrap();
        storage.write("b.txt", &b"b"[..]).await.unwrap();
        let nested = storage.base_path().join("leftover");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("c.mpg"), b"c").unwrap();

        let removed = storage.clear_all().await.unwrap();

        assert_eq!(removed, 3);
        assert!(storage.base_path().exists());
        assert_eq!(std::fs::read_dir(storage.base_path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clear_all_empty() {
        let (_temp_dir, storage) = setup_storage();
        assert_eq!(storage.clear_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();
        let content: Vec<u8> = (0..=255).collect();

        storage.write("binary.mpeg", content.as_slice()).await.unwrap();

        assert_eq!(storage.read("binary.mpeg").await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_unicode_name() {
        let (_temp_dir, storage) = setup_storage();

        storage.write("日本語ファイル.mp4", &b"data"[..]).await.unwrap();
        assert!(storage.exists("日本語ファイル.mp4").await.unwrap());
    }
}
