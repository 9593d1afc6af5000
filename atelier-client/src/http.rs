//! HTTP client for network-based API calls
//!
//! Thin wrapper over `reqwest`: builds URLs from path segments, sends JSON or
//! multipart bodies and turns every response into a `ClientResult`.

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::MessageResponse;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended with percent-encoded path segments
    pub fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!(method = %method, url = %url, "Sending request");
        Ok(self.client.request(method, url))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let request = self.request(Method::GET, segments)?;
        Self::decode(Self::execute(request).await?)
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T, Q>(&self, segments: &[&str], query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        Self::decode(Self::execute(request).await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T, B>(&self, segments: &[&str], body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        Self::decode(Self::execute(request).await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T, B>(&self, segments: &[&str], body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, segments)?.json(body);
        Self::decode(Self::execute(request).await?)
    }

    /// Make a PUT request without body
    pub async fn put_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let request = self.request(Method::PUT, segments)?;
        Self::decode(Self::execute(request).await?)
    }

    /// Make a PATCH request with JSON body, ignoring the acknowledgement
    pub async fn patch<B>(&self, segments: &[&str], body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, segments)?.json(body);
        Self::execute(request).await.map(drop)
    }

    /// Make a DELETE request, ignoring the acknowledgement
    pub async fn delete(&self, segments: &[&str]) -> ClientResult<()> {
        let request = self.request(Method::DELETE, segments)?;
        Self::execute(request).await.map(drop)
    }

    /// Make a POST request with a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: Form,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, segments)?.multipart(form);
        Self::decode(Self::execute(request).await?)
    }

    /// Make a PUT request with a multipart form
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: Form,
    ) -> ClientResult<T> {
        let request = self.request(Method::PUT, segments)?.multipart(form);
        Self::decode(Self::execute(request).await?)
    }

    async fn execute(request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Request failed");
            ClientError::Http(e)
        })?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Empty bodies read as `null`. A 2xx object with `success: false` is a
    /// rejection, the same as an error status.
    async fn handle_response(response: Response) -> ClientResult<Value> {
        let status = response.status();
        let url = response.url().clone();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&text)
                .ok()
                .and_then(|body| body.message().map(str::to_string));
            tracing::warn!(status = status.as_u16(), url = %url, message = ?message, "API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ClientError::InvalidResponse(format!("{url}: {e}")))?
        };

        if value.is_object()
            && let Ok(ack) = MessageResponse::deserialize(&value)
            && ack.is_rejection()
        {
            let message = ack.message().map(str::to_string);
            tracing::warn!(url = %url, message = ?message, "Request rejected");
            return Err(ClientError::Rejected { message });
        }

        Ok(value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
        serde_json::from_value(value).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_segments_are_encoded() {
        let http = HttpClient::new(&ClientConfig::new("http://localhost:5120/api/")).unwrap();
        let url = http.url(&["orders", "status", "En cours"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5120/api/orders/status/En%20cours");

        let url = http.url(&["users", "check-email", "a/b@x.sn"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5120/api/users/check-email/a%2Fb@x.sn");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
        let err = HttpClient::new(&ClientConfig::new("mailto:atelier@x.sn")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
