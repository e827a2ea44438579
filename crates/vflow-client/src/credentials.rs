//! Service credentials.

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Credentials for the remote training service.
///
/// The same API key authenticates both the training and the prediction
/// API; the prediction resource id is only needed when publishing an
/// iteration.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    /// Service endpoint, e.g. `https://westeurope.api.cognitive.microsoft.com`
    endpoint: String,
    /// API key
    key: String,
    /// Prediction resource id used as the publish target
    resource_id: String,
}

impl ServiceCredentials {
    /// Validate and normalize credentials.
    ///
    /// The endpoint must be an absolute http(s) URL; a trailing slash is
    /// stripped so request paths can be appended uniformly.
    pub fn new(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> ClientResult<Self> {
        let endpoint = endpoint.into();
        let parsed =
            Url::parse(&endpoint).map_err(|_| ClientError::InvalidEndpoint(endpoint.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key: key.into(),
            resource_id: resource_id.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let creds = ServiceCredentials::new("https://example.test/", "k", "r").unwrap();
        assert_eq!(creds.endpoint(), "https://example.test");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(ServiceCredentials::new("not a url", "k", "r").is_err());
        assert!(ServiceCredentials::new("ftp://example.test", "k", "r").is_err());
    }
}
