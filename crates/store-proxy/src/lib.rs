//! Intermediary-service backend for partwise multipart uploads.
//!
//! This crate provides an `ObjectStoreClient` implementation that does not
//! talk to storage directly: it calls a proxy service's
//! `/api/multipart-upload/*` endpoints, and the service performs the actual
//! store operations with its own credentials. The upload session is agnostic
//! to which backend it runs over.
//!
//! # Example
//!
//! ```ignore
//! use partwise_store_proxy::ProxyStoreClient;
//! use partwise_upload::{UploadOptions, UploadSession};
//!
//! let client = ProxyStoreClient::new("https://app.example.com");
//! let session = UploadSession::new(url, "video/mp4", UploadOptions::default())?;
//! ```

mod client;
mod wire;

pub use client::ProxyStoreClient;
