//! Error types for multipart upload operations.

use thiserror::Error;

/// Errors produced by an `ObjectStoreClient` backend.
///
/// Backends translate their transport-specific failures into this type;
/// the session tags it with the phase in which it occurred.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Network or service-level transport failure.
    #[error("Transport error: {message}")]
    Transport { message: String, retryable: bool },

    /// The store answered, but the response shape was not usable.
    #[error("Unexpected response from store: {detail}")]
    UnexpectedResponse { detail: String },

    /// Local I/O error while producing the request body.
    #[error("I/O error for {path}: {message}")]
    Io { path: String, message: String },
}

impl StoreError {
    /// Check if this error is retryable by a caller that adds a retry layer.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport { retryable, .. } => *retryable,
            StoreError::UnexpectedResponse { .. } => false,
            StoreError::Io { .. } => false,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            path: String::new(),
            message: err.to_string(),
        }
    }
}

/// Errors that can terminate an upload session.
///
/// Each variant corresponds to a phase boundary; the session converts every
/// failure into exactly one sink event carrying one of these.
#[derive(Error, Debug, Clone)]
pub enum UploadError {
    /// The target URL could not be parsed, so no object key exists.
    #[error("Invalid target URL {url}: {message}")]
    InvalidTarget { url: String, message: String },

    /// The initiation request failed at the transport level.
    #[error("Failed to initiate multipart upload for {key}: {source}")]
    Initiation { key: String, source: StoreError },

    /// The store answered the initiation request without an upload id.
    #[error("Store returned no upload id for {key}")]
    MissingUploadId { key: String },

    /// A part upload failed at the transport level.
    #[error("Failed to upload part {part_number} of {key}: {source}")]
    PartUpload {
        key: String,
        part_number: i32,
        source: StoreError,
    },

    /// A part upload succeeded structurally but carried no ETag.
    #[error("Store returned no ETag for part {part_number} of {key}")]
    MissingPartAck { key: String, part_number: i32 },

    /// Reading a chunk from the local source failed.
    #[error("Failed to read chunk at offset {offset} of {key}: {source}")]
    Source {
        key: String,
        offset: u64,
        source: StoreError,
    },

    /// The completion request failed at the transport level.
    #[error("Failed to complete multipart upload for {key}: {source}")]
    Completion { key: String, source: StoreError },

    /// The completion request went through but the store did not accept it.
    #[error("Store rejected completion for {key} (status {status:?})")]
    CompletionRejected { key: String, status: Option<u16> },

    /// The upload was cancelled cooperatively before finishing.
    #[error("Upload cancelled for {key}")]
    Cancelled { key: String },
}

impl UploadError {
    /// Part number associated with this error, if it occurred during transfer.
    pub fn part_number(&self) -> Option<i32> {
        match self {
            UploadError::PartUpload { part_number, .. }
            | UploadError::MissingPartAck { part_number, .. } => Some(*part_number),
            _ => None,
        }
    }

    /// Whether this error was raised before any part was requested.
    pub fn is_initiation(&self) -> bool {
        matches!(
            self,
            UploadError::InvalidTarget { .. }
                | UploadError::Initiation { .. }
                | UploadError::MissingUploadId { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_retryable() {
        let err = StoreError::Transport {
            message: "timeout".to_string(),
            retryable: true,
        };
        assert!(err.is_retryable());

        let err = StoreError::UnexpectedResponse {
            detail: "empty body".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_upload_error_part_number() {
        let err = UploadError::MissingPartAck {
            key: "videos/demo.mp4".to_string(),
            part_number: 3,
        };
        assert_eq!(err.part_number(), Some(3));

        let err = UploadError::MissingUploadId {
            key: "videos/demo.mp4".to_string(),
        };
        assert_eq!(err.part_number(), None);
        assert!(err.is_initiation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
