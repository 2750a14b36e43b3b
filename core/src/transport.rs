//! Transports execute one `HttpRequest` and hand back the `HttpResponse`.
//!
//! # Design
//! `ApiClient` never talks to reqwest directly. It depends on the `Transport`
//! trait, which keeps the request/response pair as plain data and lets tests
//! substitute an in-memory implementation. Logging is not a hook buried in the
//! client: it is `LoggingTransport`, a decorator composed around whatever
//! transport is in use, so it can be dropped or replaced independently.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::{ApiError, TransportError};
use crate::http::{reason_phrase, HttpMethod, HttpRequest, HttpResponse};

/// Executes a single request/response exchange.
///
/// Implementations return `Ok` for every response received, including 4xx
/// and 5xx, and `Err` only when no response arrived.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Production transport backed by a single pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the underlying client once. `timeout` bounds the whole exchange,
    /// from connect to the last body byte; `None` leaves it unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        Self::build(reqwest::Client::builder().use_rustls_tls(), timeout)
    }

    fn build(builder: reqwest::ClientBuilder, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder.build().map_err(|e| ApiError::Build(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

/// Decorator that logs every exchange passing through `inner`.
///
/// Method and URL are logged at info before dispatch, the request body at
/// debug. Afterwards the status goes to info (or error for 400 and above) and
/// the response body to debug. A missing response is logged at error. The
/// request and response are passed through untouched.
#[derive(Debug, Clone)]
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T> LoggingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for LoggingTransport<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        let url = request.url.clone();

        info!(%method, %url, "request");
        if let Some(body) = &request.body {
            debug!(%method, %url, %body, "request body");
        }

        match self.inner.send(request).await {
            Ok(response) => {
                let status = response.status;
                let reason = reason_phrase(status);
                if response.is_error() {
                    error!(%method, %url, status, reason, "response error");
                } else {
                    info!(%method, %url, status, reason, "response");
                }
                debug!(status, body = %response.body, "response body");
                Ok(response)
            }
            Err(err) => {
                error!(%method, %url, error = %err, "network error");
                Err(err)
            }
        }
    }
}
