//! Shared data structures for multipart upload sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Default chunk size for part uploads (5 MiB).
/// Matches the S3 minimum part size, so every non-final part is accepted.
pub const DEFAULT_CHUNK_SIZE: u64 = 5 * 1024 * 1024; // 5242880 bytes

/// One acknowledged part of a multipart upload.
///
/// Produced only from a successful part-upload response carrying an ETag.
/// The serialized field names are the wire shape the completion call expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPart {
    /// 1-based part sequence number.
    #[serde(rename = "PartNumber")]
    pub part_number: i32,
    /// Opaque acknowledgment token issued by the store for this part.
    #[serde(rename = "ETag")]
    pub e_tag: String,
}

impl CompletedPart {
    /// Create a part record.
    pub fn new(part_number: i32, e_tag: impl Into<String>) -> Self {
        Self {
            part_number,
            e_tag: e_tag.into(),
        }
    }
}

/// Store response to a completion request.
///
/// The session checks `success` itself rather than trusting backends to
/// turn a non-success response into an error.
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// Whether the store accepted the part list and finalized the object.
    pub success: bool,
    /// HTTP-level status, when the backend has one.
    pub status: Option<u16>,
    /// Location of the finalized object, when reported.
    pub location: Option<String>,
    /// ETag of the finalized object, when reported.
    pub e_tag: Option<String>,
}

impl CompletionResponse {
    /// A successful completion with the given status.
    pub fn accepted(status: u16) -> Self {
        Self {
            success: true,
            status: Some(status),
            ..Default::default()
        }
    }

    /// A completion the store did not accept.
    pub fn rejected(status: Option<u16>) -> Self {
        Self {
            success: false,
            status,
            ..Default::default()
        }
    }
}

/// Progress update emitted once per acknowledged chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Percentage of bytes uploaded, 0.0 to 100.0, rounded to 2 decimals.
    pub percent_complete: f64,
    /// Estimated seconds remaining, None while throughput is unknown.
    pub eta_seconds: Option<u64>,
    /// Bytes acknowledged so far.
    pub bytes_uploaded: u64,
    /// Total bytes in the source.
    pub bytes_total: u64,
    /// Part number whose acknowledgment produced this event.
    pub part_number: i32,
}

/// Terminal result of running an upload session.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// All parts acknowledged and the store finalized the object.
    Completed(CompletionResponse),
    /// The session failed at some phase; no further requests were made.
    Failed(UploadError),
    /// The session was cancelled cooperatively; `complete` was never called.
    Cancelled,
}

impl UploadOutcome {
    /// Whether the upload reached the completed state.
    pub fn is_completed(&self) -> bool {
        matches!(self, UploadOutcome::Completed(_))
    }
}

/// Options for an upload session.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Size of each uploaded chunk; the final chunk may be smaller.
    pub chunk_size: u64,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl UploadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size in bytes. Must be non-zero.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Shared cooperative cancellation flag.
///
/// The session checks the flag before each chunk request; once raised,
/// no further requests are made and the session ends in `Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
