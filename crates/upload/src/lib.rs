//! Multipart upload orchestration over a pluggable object-store client.
//!
//! This crate drives one file's chunked upload lifecycle through three
//! phases - initiate, transfer, complete - against any `ObjectStoreClient`
//! implementation. Chunks are uploaded strictly sequentially, each
//! acknowledged part is recorded in order, and progress with an ETA estimate
//! is reported through a caller-supplied `ProgressSink`.
//!
//! Backends live in sibling crates:
//!
//! - `partwise-store-s3` - direct S3 via the AWS SDK for Rust
//! - `partwise-store-proxy` - an intermediary HTTP service that talks to
//!   storage itself
//!
//! # Example
//!
//! ```ignore
//! use partwise_upload::{FileSource, NoOpSink, UploadOptions, UploadSession};
//!
//! let session = UploadSession::new(
//!     "https://bucket.example.com/videos/demo.mp4",
//!     "video/mp4",
//!     UploadOptions::default(),
//! )?;
//! let source = FileSource::open("demo.mp4").await?;
//! let outcome = session.run(&client, &source, &NoOpSink).await;
//! ```

pub mod chunk;
mod error;
mod session;
mod sink;
mod source;
mod traits;
mod types;

pub use error::{StoreError, UploadError};
pub use session::UploadSession;
pub use sink::{sink_fn, FnSink, NoOpSink, ProgressSink};
pub use source::FileSource;
pub use traits::{ChunkSource, ObjectStoreClient};
pub use types::{
    CancelFlag, CompletedPart, CompletionResponse, ProgressEvent, UploadOptions, UploadOutcome,
    DEFAULT_CHUNK_SIZE,
};
