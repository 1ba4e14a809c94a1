//! File-backed chunk source.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::StoreError;
use crate::traits::ChunkSource;

/// `ChunkSource` reading byte ranges from a local file.
///
/// The size is captured at open time; the file is assumed immutable for the
/// lifetime of the upload. Each chunk read opens its own handle so the source
/// stays shareable without interior locking.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    size: u64,
}

impl FileSource {
    /// Open a file and capture its size.
    ///
    /// # Arguments
    /// * `path` - Path to the file to upload
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            size: metadata.len(),
            path,
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ChunkSource for FileSource {
    fn len(&self) -> u64 {
        self.size
    }

    async fn read_chunk(&self, offset: u64, length: u64) -> Result<Bytes, StoreError> {
        let mut file = File::open(&self.path).await.map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| StoreError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut buffer: Vec<u8> = vec![0u8; length as usize];
        file.read_exact(&mut buffer)
            .await
            .map_err(|e| StoreError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Bytes::from(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_open_and_read() {
        let dir = std::env::temp_dir().join("partwise-file-source-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("sample.bin");
        tokio::fs::write(&path, b"hello chunked world").await.unwrap();

        let source = FileSource::open(&path).await.unwrap();
        assert_eq!(source.len(), 19);

        let chunk = source.read_chunk(6, 7).await.unwrap();
        assert_eq!(&chunk[..], b"chunked");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let err = FileSource::open("/nonexistent/partwise/nope.bin")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
