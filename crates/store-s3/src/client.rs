//! AWS SDK S3 client implementation.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart as SdkCompletedPart};
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;

use partwise_upload::{CompletedPart, CompletionResponse, ObjectStoreClient, StoreError};

use crate::settings::S3Settings;

/// `ObjectStoreClient` implementation talking to S3 directly through the
/// AWS SDK for Rust.
pub struct S3StoreClient {
    /// The underlying S3 client.
    s3_client: S3Client,
    /// Bucket every upload in this client targets.
    bucket: String,
}

impl S3StoreClient {
    /// Create a new S3 store client.
    ///
    /// Uses the default credential chain unless static credentials are set
    /// in the settings.
    ///
    /// # Arguments
    /// * `settings` - Region, bucket, and optional static credentials
    pub async fn new(settings: S3Settings) -> Result<Self, StoreError> {
        let config_loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.clone()));

        let config_loader = if let Some(ref creds) = settings.credentials {
            let credentials = Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                creds.session_token.clone(),
                None,
                "partwise",
            );
            config_loader.credentials_provider(credentials)
        } else {
            config_loader
        };

        let sdk_config = config_loader.load().await;
        let s3_client = S3Client::new(&sdk_config);

        Ok(Self {
            s3_client,
            bucket: settings.bucket,
        })
    }

    /// Create a client from an existing S3Client (for testing).
    ///
    /// # Arguments
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket` - Target bucket
    pub fn from_client(s3_client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            s3_client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStoreClient for S3StoreClient {
    async fn initiate(&self, key: &str, content_type: &str) -> Result<String, StoreError> {
        let output = self
            .s3_client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| StoreError::Transport {
                message: err.to_string(),
                retryable: true,
            })?;

        // An absent upload id is returned as empty; the session treats that
        // as its own failure mode.
        Ok(output.upload_id().unwrap_or_default().to_string())
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> Result<String, StoreError> {
        let output = self
            .s3_client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| StoreError::Transport {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(output.e_tag().unwrap_or_default().to_string())
    }

    async fn complete(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletionResponse, StoreError> {
        let sdk_parts: Vec<SdkCompletedPart> = parts
            .iter()
            .map(|p| {
                SdkCompletedPart::builder()
                    .part_number(p.part_number)
                    .e_tag(&p.e_tag)
                    .build()
            })
            .collect();

        let completed = CompletedMultipartUpload::builder()
            .set_parts(Some(sdk_parts))
            .build();

        let output = self
            .s3_client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(completed)
            .send()
            .await
            .map_err(|err| StoreError::Transport {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(CompletionResponse {
            success: true,
            status: Some(200),
            location: output.location().map(|s| s.to_string()),
            e_tag: output.e_tag().map(|s| s.to_string()),
        })
    }
}
