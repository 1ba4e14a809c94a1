//! Multipart upload session state machine.
//!
//! A session drives one source through initiate, transfer, and complete
//! phases over an injected `ObjectStoreClient`. Parts are uploaded strictly
//! sequentially: part N+1 is never requested before part N's ETag is
//! recorded, so the part list is gap-free and ascending by construction,
//! which the completion call depends on.

use std::time::Instant;

use url::Url;

use crate::chunk::{estimate_seconds_remaining, next_chunk_len, percent_complete};
use crate::error::UploadError;
use crate::sink::ProgressSink;
use crate::traits::{ChunkSource, ObjectStoreClient};
use crate::types::{CancelFlag, CompletedPart, ProgressEvent, UploadOptions, UploadOutcome};

/// One file's multipart upload lifecycle.
///
/// Construction is pure: it validates the target URL and derives the object
/// key, but performs no I/O. `run` consumes the session, so a session cannot
/// be reused after reaching a terminal state; the terminal state is the
/// returned `UploadOutcome`.
#[derive(Debug)]
pub struct UploadSession {
    object_key: String,
    content_type: String,
    options: UploadOptions,
    cancel: CancelFlag,
    upload_id: String,
    file_pointer: u64,
    bytes_uploaded: u64,
    bytes_remaining: u64,
    parts: Vec<CompletedPart>,
}

impl UploadSession {
    /// Create a session targeting the object named by a URL's path.
    ///
    /// The object key is the URL path with its leading separator stripped.
    /// A malformed URL is a constructor error, not a silently dead session.
    ///
    /// # Arguments
    /// * `target_url` - Well-formed URL whose path names the object
    /// * `content_type` - Content type passed to the store at initiation
    /// * `options` - Chunk size and other tunables
    pub fn new(
        target_url: &str,
        content_type: impl Into<String>,
        options: UploadOptions,
    ) -> Result<Self, UploadError> {
        let parsed = Url::parse(target_url).map_err(|e| UploadError::InvalidTarget {
            url: target_url.to_string(),
            message: e.to_string(),
        })?;

        let object_key = parsed.path().trim_start_matches('/').to_string();
        if object_key.is_empty() {
            return Err(UploadError::InvalidTarget {
                url: target_url.to_string(),
                message: "URL path carries no object key".to_string(),
            });
        }

        let mut options = options;
        options.chunk_size = options.chunk_size.max(1);

        Ok(Self {
            object_key,
            content_type: content_type.into(),
            options,
            cancel: CancelFlag::new(),
            upload_id: String::new(),
            file_pointer: 0,
            bytes_uploaded: 0,
            bytes_remaining: 0,
            parts: Vec::new(),
        })
    }

    /// Attach a shared cancellation flag, checked before each chunk request.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Object key derived from the target URL.
    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    /// Run the upload to a terminal state.
    ///
    /// Every failure is converted into exactly one `on_error` sink event;
    /// success ends in exactly one `on_completed`. The returned outcome
    /// mirrors the terminal event.
    pub async fn run<C, S>(
        mut self,
        client: &C,
        source: &S,
        sink: &dyn ProgressSink,
    ) -> UploadOutcome
    where
        C: ObjectStoreClient + ?Sized,
        S: ChunkSource + ?Sized,
    {
        let started_at = Instant::now();
        let bytes_total = source.len();
        self.bytes_remaining = bytes_total;

        log::debug!(
            "Initiating multipart upload for {} ({} bytes, {} byte chunks)",
            self.object_key,
            bytes_total,
            self.options.chunk_size
        );

        let upload_id = match client.initiate(&self.object_key, &self.content_type).await {
            Ok(id) => id,
            Err(e) => {
                return self.fail(
                    sink,
                    UploadError::Initiation {
                        key: self.object_key.clone(),
                        source: e,
                    },
                );
            }
        };
        if upload_id.is_empty() {
            return self.fail(
                sink,
                UploadError::MissingUploadId {
                    key: self.object_key.clone(),
                },
            );
        }
        self.upload_id = upload_id;

        while self.bytes_remaining > 0 {
            if self.cancel.is_cancelled() {
                return self.cancelled(sink);
            }

            let current_chunk_size = next_chunk_len(self.bytes_remaining, self.options.chunk_size);
            let part_number = self.parts.len() as i32 + 1;

            let chunk = match source.read_chunk(self.file_pointer, current_chunk_size).await {
                Ok(chunk) => chunk,
                Err(e) => {
                    return self.fail(
                        sink,
                        UploadError::Source {
                            key: self.object_key.clone(),
                            offset: self.file_pointer,
                            source: e,
                        },
                    );
                }
            };

            let e_tag = match client
                .upload_part(&self.object_key, &self.upload_id, part_number, chunk)
                .await
            {
                Ok(e_tag) => e_tag,
                Err(e) => {
                    return self.fail(
                        sink,
                        UploadError::PartUpload {
                            key: self.object_key.clone(),
                            part_number,
                            source: e,
                        },
                    );
                }
            };
            if e_tag.is_empty() {
                return self.fail(
                    sink,
                    UploadError::MissingPartAck {
                        key: self.object_key.clone(),
                        part_number,
                    },
                );
            }

            self.parts.push(CompletedPart::new(part_number, e_tag));
            self.file_pointer += current_chunk_size;
            self.bytes_uploaded += current_chunk_size;
            self.bytes_remaining -= current_chunk_size;
            debug_assert_eq!(self.bytes_uploaded + self.bytes_remaining, bytes_total);

            let event = ProgressEvent {
                percent_complete: percent_complete(self.bytes_uploaded, bytes_total),
                eta_seconds: estimate_seconds_remaining(
                    self.bytes_uploaded,
                    bytes_total,
                    started_at.elapsed().as_secs_f64(),
                ),
                bytes_uploaded: self.bytes_uploaded,
                bytes_total,
                part_number,
            };
            log::debug!(
                "Part {} of {} acknowledged ({:.2}%)",
                part_number,
                self.object_key,
                event.percent_complete
            );
            if !sink.on_progress(&event) {
                return self.cancelled(sink);
            }
        }

        log::debug!(
            "Completing multipart upload for {} with {} parts",
            self.object_key,
            self.parts.len()
        );

        let response = match client
            .complete(&self.object_key, &self.upload_id, &self.parts)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return self.fail(
                    sink,
                    UploadError::Completion {
                        key: self.object_key.clone(),
                        source: e,
                    },
                );
            }
        };
        if !response.success {
            return self.fail(
                sink,
                UploadError::CompletionRejected {
                    key: self.object_key.clone(),
                    status: response.status,
                },
            );
        }

        sink.on_completed(&response);
        UploadOutcome::Completed(response)
    }

    fn fail(&self, sink: &dyn ProgressSink, error: UploadError) -> UploadOutcome {
        log::warn!("Upload of {} failed: {}", self.object_key, error);
        sink.on_error(&error);
        UploadOutcome::Failed(error)
    }

    fn cancelled(&self, sink: &dyn ProgressSink) -> UploadOutcome {
        log::debug!("Upload of {} cancelled", self.object_key);
        sink.on_error(&UploadError::Cancelled {
            key: self.object_key.clone(),
        });
        UploadOutcome::Cancelled
    }
}
