//! Traits at the transport and data seams of the upload session.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;
use crate::types::{CompletedPart, CompletionResponse};

/// Object-store operations a multipart upload needs - implemented by each
/// backend (direct S3, or a proxy service that talks to storage itself).
///
/// Backends return identifier and acknowledgment tokens verbatim, including
/// empty ones; validating them is the session's job.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Start a multipart upload and return the upload id issued by the store.
    async fn initiate(&self, key: &str, content_type: &str) -> Result<String, StoreError>;

    /// Upload one part and return the ETag acknowledging it.
    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> Result<String, StoreError>;

    /// Finalize the object from the ordered, gap-free part list.
    async fn complete(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletionResponse, StoreError>;
}

/// A byte-addressable source the session slices chunks out of.
///
/// The session never holds more than one chunk in memory at a time and never
/// reads outside `[0, len)`.
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// Total size of the source in bytes.
    fn len(&self) -> u64;

    /// Whether the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read exactly `length` bytes starting at `offset`.
    async fn read_chunk(&self, offset: u64, length: u64) -> Result<Bytes, StoreError>;
}

#[async_trait]
impl ChunkSource for Bytes {
    fn len(&self) -> u64 {
        Bytes::len(self) as u64
    }

    async fn read_chunk(&self, offset: u64, length: u64) -> Result<Bytes, StoreError> {
        let start = offset as usize;
        let end = start + length as usize;
        if end > Bytes::len(self) {
            return Err(StoreError::Io {
                path: String::new(),
                message: format!(
                    "Chunk [{start}, {end}) out of bounds for {} byte source",
                    Bytes::len(self)
                ),
            });
        }
        Ok(self.slice(start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bytes_source_slices() {
        let source = Bytes::from_static(b"0123456789");
        assert_eq!(ChunkSource::len(&source), 10);

        let chunk = source.read_chunk(2, 3).await.unwrap();
        assert_eq!(&chunk[..], b"234");
    }

    #[tokio::test]
    async fn test_bytes_source_out_of_bounds() {
        let source = Bytes::from_static(b"abc");
        let err = source.read_chunk(2, 5).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
