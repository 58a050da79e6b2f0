use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{ConnectionTypeApi, ResponseStatus};
use crate::config::CoreConfig;
use crate::constants::{endpoints, REQUEST_TIMEOUT_MS};
use crate::error::{CoreError, CoreResult};
use crate::models::ConnectionType;

/// JSON-pointer path of the enabled annotation (`/` escaped as `~1`)
const ENABLED_PATCH_PATH: &str = "/metadata/annotations/opendatahub.io~1enabled";

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Dashboard backend client over HTTP
#[derive(Debug, Clone)]
pub struct HttpConnectionTypeApi {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpConnectionTypeApi {
    pub fn new(config: &CoreConfig) -> CoreResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            base_url,
            token: config.token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, endpoints::CONNECTION_TYPES)
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}{}/{}", self.base_url, endpoints::CONNECTION_TYPES, name)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-2xx to `CoreError::Status`, carrying the backend's message when it sent one
    async fn check(response: Response) -> CoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        Err(CoreError::Status { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CoreResult<T> {
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ConnectionTypeApi for HttpConnectionTypeApi {
    async fn list(&self) -> CoreResult<Vec<ConnectionType>> {
        let response = self
            .request(Method::GET, &self.collection_url())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> CoreResult<ResponseStatus> {
        let patch = json!([{
            "op": "replace",
            "path": ENABLED_PATCH_PATH,
            "value": enabled.to_string(),
        }]);

        tracing::debug!(name, enabled, "patching connection type");
        let response = self
            .request(Method::PATCH, &self.item_url(name))
            .json(&patch)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, name: &str) -> CoreResult<ResponseStatus> {
        tracing::debug!(name, "deleting connection type");
        let response = self
            .request(Method::DELETE, &self.item_url(name))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create(&self, connection_type: &ConnectionType) -> CoreResult<ResponseStatus> {
        tracing::debug!(name = connection_type.name(), "creating connection type");
        let response = self
            .request(Method::POST, &self.collection_url())
            .json(connection_type)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = HttpConnectionTypeApi::new(&CoreConfig::new("ftp://example")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let api = HttpConnectionTypeApi::new(&CoreConfig::new("http://localhost:4010/")).unwrap();
        assert_eq!(api.base_url(), "http://localhost:4010");
        assert_eq!(
            api.collection_url(),
            "http://localhost:4010/api/connection-types"
        );
        assert_eq!(
            api.item_url("s3"),
            "http://localhost:4010/api/connection-types/s3"
        );
    }
}
