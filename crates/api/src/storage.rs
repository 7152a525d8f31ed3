//! File storage seam.
//!
//! Uploads and BOM documents go through the [`FileStore`] trait so
//! tests can substitute a failing or in-memory store. The production
//! implementation writes beneath the configured upload directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Storage for uploaded artifacts, addressed by relative path.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, path: &str, bytes: &[u8]) -> std::io::Result<()>;
    async fn read(&self, path: &str) -> std::io::Result<Vec<u8>>;
    async fn exists(&self, path: &str) -> bool;
    async fn delete(&self, path: &str) -> std::io::Result<()>;
}

/// Filesystem-backed store rooted at the upload directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> std::io::Result<PathBuf> {
        // Relative paths only; a traversal component means a caller bug.
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid storage path '{path}'"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, path: &str, bytes: &[u8]) -> std::io::Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(full, bytes).await
    }

    async fn read(&self, path: &str) -> std::io::Result<Vec<u8>> {
        let full = self.resolve(path)?;
        tokio::fs::read(full).await
    }

    async fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(full) => tokio::fs::try_exists(full).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn delete(&self, path: &str) -> std::io::Result<()> {
        let full = self.resolve(path)?;
        tokio::fs::remove_file(full).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_read_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        store.save("projects/1/part.stl", b"solid x").await.unwrap();
        assert!(store.exists("projects/1/part.stl").await);
        assert_eq!(store.read("projects/1/part.stl").await.unwrap(), b"solid x");

        store.delete("projects/1/part.stl").await.unwrap();
        assert!(!store.exists("projects/1/part.stl").await);
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        assert!(store.save("../escape.stl", b"x").await.is_err());
        assert!(store.save("/etc/passwd", b"x").await.is_err());
    }
}
