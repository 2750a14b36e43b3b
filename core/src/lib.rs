//! Typed async client for the users/posts fixture API.
//!
//! # Overview
//! `ApiClient` owns the configuration shared by every call (base URL, default
//! JSON headers) and a `Transport` that performs the exchange. The users and
//! posts services sit on top of it and expose typed CRUD methods. JSON Schema
//! validation of payloads lives in `schema`.
//!
//! # Design
//! - The client is stateless between calls; one instance behind an `Arc` is
//!   shared by both services (`Services::new`).
//! - The transport is a trait. Production code uses reqwest wrapped in the
//!   `LoggingTransport` decorator; tests substitute their own.
//! - Failures are split by whether a response arrived: `ApiError::Network`
//!   versus `ApiError::HttpStatus`. Nothing is retried or cached.
//!
//! ```no_run
//! use placeholder_core::{ClientConfig, CreateUserRequest, Services};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! placeholder_core::telemetry::init(config.log_level);
//! let api = Services::from_config(&config)?;
//!
//! let created = api.users.create(&CreateUserRequest::new("Post Author", "author@example.com")).await?;
//! let posts = api.posts.by_user(1).await?;
//! println!("{} -> {} posts", created.status, posts.data.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod schema;
pub mod service;
pub mod telemetry;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, ApiResponse, DefaultTransport, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use schema::{compile, validate, CompiledSchema, SchemaValidationError, Violation};
pub use service::{PostService, Posts, Resource, ResourceService, Services, UserService, Users};
pub use transport::{LoggingTransport, ReqwestTransport, Transport};
pub use types::{
    Address, Company, CreatePostRequest, CreateUserRequest, Geo, Post, UpdatePostRequest, UpdateUserRequest, User,
};
