//! Request and response bodies of the multipart-upload proxy API.

use partwise_upload::CompletedPart;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/multipart-upload/get-upload-id`.
#[derive(Debug, Serialize)]
pub struct InitiateRequest<'a> {
    #[serde(rename = "keyPath")]
    pub key_path: &'a str,
    #[serde(rename = "type")]
    pub content_type: &'a str,
}

/// Response to the initiation request.
#[derive(Debug, Deserialize)]
pub struct InitiateResponse {
    #[serde(rename = "uploadId", default)]
    pub upload_id: Option<String>,
}

/// Response to a part upload; the acknowledgment is nested under `response`.
#[derive(Debug, Deserialize)]
pub struct PartResponse {
    #[serde(default)]
    pub response: Option<PartAck>,
}

/// Acknowledgment payload of a part upload.
#[derive(Debug, Deserialize)]
pub struct PartAck {
    #[serde(rename = "ETag", default)]
    pub e_tag: Option<String>,
}

/// Body of `POST /api/multipart-upload/completed-multipart-upload`.
#[derive(Debug, Serialize)]
pub struct CompleteRequest<'a> {
    #[serde(rename = "Key")]
    pub key: &'a str,
    #[serde(rename = "UploadId")]
    pub upload_id: &'a str,
    #[serde(rename = "Parts")]
    pub parts: &'a [CompletedPart],
}

/// Response to the completion request.
#[derive(Debug, Deserialize)]
pub struct CompleteResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate_request_shape() {
        let body = InitiateRequest {
            key_path: "videos/demo.mp4",
            content_type: "video/mp4",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"keyPath":"videos/demo.mp4","type":"video/mp4"}"#);
    }

    #[test]
    fn test_initiate_response_missing_id() {
        let parsed: InitiateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.upload_id.is_none());
    }

    #[test]
    fn test_part_response_nested_etag() {
        let parsed: PartResponse =
            serde_json::from_str(r#"{"response":{"ETag":"\"abc\""}}"#).unwrap();
        assert_eq!(parsed.response.unwrap().e_tag.as_deref(), Some("\"abc\""));
    }

    #[test]
    fn test_complete_request_part_list_order() {
        let parts = vec![CompletedPart::new(1, "a"), CompletedPart::new(2, "b")];
        let body = CompleteRequest {
            key: "k",
            upload_id: "u",
            parts: &parts,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"Key":"k","UploadId":"u","Parts":[{"PartNumber":1,"ETag":"a"},{"PartNumber":2,"ETag":"b"}]}"#
        );
    }
}
