//! Direct S3 backend for partwise multipart uploads.
//!
//! This crate provides an `ObjectStoreClient` implementation using the AWS
//! SDK for Rust: `CreateMultipartUpload`, `UploadPart`, and
//! `CompleteMultipartUpload` map one-to-one onto the trait's operations.
//!
//! # Example
//!
//! ```ignore
//! use partwise_store_s3::{S3Settings, S3StoreClient};
//! use partwise_upload::{UploadOptions, UploadSession};
//!
//! let client = S3StoreClient::new(S3Settings::new("us-west-2", "media")).await?;
//! let session = UploadSession::new(url, "video/mp4", UploadOptions::default())?;
//! ```

mod client;
mod settings;

pub use client::S3StoreClient;
pub use settings::{AwsCredentials, S3Settings};
