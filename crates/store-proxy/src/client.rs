//! HTTP client for the multipart-upload proxy service.

use async_trait::async_trait;
use bytes::Bytes;

use partwise_upload::{CompletedPart, CompletionResponse, ObjectStoreClient, StoreError};

use crate::wire::{
    CompleteRequest, CompleteResponse, InitiateRequest, InitiateResponse, PartResponse,
};

/// `ObjectStoreClient` implementation that proxies through an intermediary
/// service, which itself talks to storage. Credentials live on the service
/// side; this client only needs its base URL.
pub struct ProxyStoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl ProxyStoreClient {
    /// Create a client for a proxy service.
    ///
    /// # Arguments
    /// * `base_url` - Service origin, e.g. `https://app.example.com`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client with a pre-configured `reqwest::Client` (timeouts,
    /// proxies, and TLS settings belong to the caller).
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut client = Self::new(base_url);
        client.http = http;
        client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/multipart-upload/{}", self.base_url, path)
    }

    fn transport_error(err: reqwest::Error) -> StoreError {
        StoreError::Transport {
            message: err.to_string(),
            retryable: err.is_timeout() || err.is_connect(),
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Proxy returned HTTP {status}");
            return Err(StoreError::UnexpectedResponse {
                detail: format!("HTTP {status}: {body}"),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ObjectStoreClient for ProxyStoreClient {
    async fn initiate(&self, key: &str, content_type: &str) -> Result<String, StoreError> {
        let response = self
            .http
            .post(self.endpoint("get-upload-id"))
            .json(&InitiateRequest {
                key_path: key,
                content_type,
            })
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response).await?;

        let body: InitiateResponse = response.json().await.map_err(Self::transport_error)?;
        // A body without an upload id is returned as empty; the session
        // treats that as its own failure mode.
        Ok(body.upload_id.unwrap_or_default())
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> Result<String, StoreError> {
        let content_length = body.len();
        let response = self
            .http
            .put(self.endpoint("upload-part-command"))
            .header("Content-Type", "application/octet-stream")
            .header("Key", key)
            .header("PartNumber", part_number)
            .header("UploadId", upload_id)
            .header("ContentLength", content_length)
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response).await?;

        let body: PartResponse = response.json().await.map_err(Self::transport_error)?;
        Ok(body
            .response
            .and_then(|ack| ack.e_tag)
            .unwrap_or_default())
    }

    async fn complete(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<CompletionResponse, StoreError> {
        let response = self
            .http
            .post(self.endpoint("completed-multipart-upload"))
            .json(&CompleteRequest {
                key,
                upload_id,
                parts,
            })
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response).await?;

        let status = response.status().as_u16();
        let body: CompleteResponse = response.json().await.map_err(Self::transport_error)?;

        Ok(CompletionResponse {
            success: body.success,
            status: Some(status),
            location: None,
            e_tag: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ProxyStoreClient::new("https://app.example.com/");
        assert_eq!(
            client.endpoint("get-upload-id"),
            "https://app.example.com/api/multipart-upload/get-upload-id"
        );
    }

    #[test]
    fn test_proxy_store_client_implements_trait() {
        fn assert_store_client<T: ObjectStoreClient>() {}
        assert_store_client::<ProxyStoreClient>();
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_store_error() {
        let raw = http::Response::builder()
            .status(502)
            .body("bad gateway")
            .unwrap();
        let err = ProxyStoreClient::check_status(reqwest::Response::from(raw))
            .await
            .unwrap_err();
        match err {
            StoreError::UnexpectedResponse { detail } => {
                assert!(detail.contains("502"));
                assert!(detail.contains("bad gateway"));
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
    }
}
