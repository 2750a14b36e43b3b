//! Configured HTTP client wrapper for the fixture API.
//!
//! # Design
//! `ApiClient` holds the immutable pieces of configuration (base URL, default
//! headers) and one `Transport`. It carries no mutable state between calls,
//! so a single instance can be shared behind an `Arc` and used from many
//! tasks at once. Each verb builds an `HttpRequest`, sends it through the
//! transport, maps statuses of 400 and above to `ApiError::HttpStatus` and
//! decodes the body. Nothing is retried.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{LoggingTransport, ReqwestTransport, Transport};

/// The transport stack `ApiClient::from_config` assembles.
pub type DefaultTransport = LoggingTransport<ReqwestTransport>;

/// Per-call additions to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Overrides a default header with the same name.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A successful response with its body decoded into `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<B> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: B,
}

impl<B> ApiResponse<B> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn map<U>(self, f: impl FnOnce(B) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
        }
    }
}

/// Typed verbs over a single configured transport.
#[derive(Debug, Clone)]
pub struct ApiClient<T = DefaultTransport> {
    base_url: String,
    headers: Vec<(String, String)>,
    transport: T,
}

impl ApiClient<DefaultTransport> {
    /// reqwest with the configured timeout, wrapped in request/response logging.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, LoggingTransport::new(transport)))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: config.headers.clone(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<R>, ApiError> {
        let request = self.build_request(HttpMethod::Get, path, None, options);
        self.execute(request).await
    }

    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Post, path, Some(encode(body)?), options);
        self.execute(request).await
    }

    pub async fn put<B, R>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Put, path, Some(encode(body)?), options);
        self.execute(request).await
    }

    pub async fn patch<B, R>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Patch, path, Some(encode(body)?), options);
        self.execute(request).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<R>, ApiError> {
        let request = self.build_request(HttpMethod::Delete, path, None, options);
        self.execute(request).await
    }

    /// Resolve `path` against the base URL and merge headers. Absolute
    /// `http(s)://` paths bypass the base URL.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        options: RequestOptions,
    ) -> HttpRequest {
        let mut target = self.resolve(path);
        if !options.query.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (name, value) in &options.query {
                serializer.append_pair(name, value);
            }
            let query = serializer.finish();
            target.push(if target.contains('?') { '&' } else { '?' });
            target.push_str(&query);
        }

        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .filter(|(name, _)| {
                !options
                    .headers
                    .iter()
                    .any(|(over, _)| over.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect();
        headers.extend(options.headers);

        HttpRequest {
            method,
            url: target,
            headers,
            body,
        }
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<ApiResponse<R>, ApiError> {
        let response = self.transport.send(request).await?;
        let response = check_status(response)?;
        let data = decode(&response.body)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
        })
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Bodyless responses decode as JSON `null`, which `()` and `Option<_>` accept.
fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_error() {
        return Err(ApiError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }
    Ok(response)
}
