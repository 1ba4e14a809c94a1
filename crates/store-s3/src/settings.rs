//! Configuration for the S3 backend.

/// Settings for building an `S3StoreClient`.
#[derive(Debug, Clone)]
pub struct S3Settings {
    /// AWS region.
    pub region: String,
    /// Bucket uploads target.
    pub bucket: String,
    /// Static credentials; None uses the default credential chain.
    pub credentials: Option<AwsCredentials>,
}

impl S3Settings {
    /// Create settings for a region and bucket using the default chain.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            credentials: None,
        }
    }

    /// Set static credentials.
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// AWS credentials.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_builder() {
        let settings = S3Settings::new("us-west-2", "media").with_credentials(AwsCredentials {
            access_key_id: "AKIA".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        });

        assert_eq!(settings.region, "us-west-2");
        assert_eq!(settings.bucket, "media");
        assert!(settings.credentials.is_some());
    }
}
