//! Resource services mapping CRUD operations onto `ApiClient` verbs.
//!
//! # Design
//! Users and posts expose the same operations over a different collection
//! path and payload types, so there is one `ResourceService` parameterized by
//! a `Resource` marker. `UserService` and `PostService` are aliases of it.
//! Services hold an `Arc<ApiClient>` and no other state; `Services` builds
//! both over one shared client.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::client::{ApiClient, ApiResponse, DefaultTransport, RequestOptions};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreatePostRequest, CreateUserRequest, Post, UpdatePostRequest, UpdateUserRequest, User};

/// A collection endpoint and the payload types it speaks.
pub trait Resource {
    /// Collection path relative to the base URL, e.g. `/users`.
    const PATH: &'static str;
    type Entity: DeserializeOwned + Send;
    /// Full payload, used for create and for PUT replacement.
    type Create: Serialize + Sync;
    /// Partial payload for PATCH.
    type Update: Serialize + Sync;
}

/// The `/users` resource.
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "/users";
    type Entity = User;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
}

/// The `/posts` resource.
#[derive(Debug, Clone, Copy)]
pub struct Posts;

impl Resource for Posts {
    const PATH: &'static str = "/posts";
    type Entity = Post;
    type Create = CreatePostRequest;
    type Update = UpdatePostRequest;
}

pub struct ResourceService<R, T = DefaultTransport> {
    client: Arc<ApiClient<T>>,
    _resource: PhantomData<fn() -> R>,
}

pub type UserService<T = DefaultTransport> = ResourceService<Users, T>;
pub type PostService<T = DefaultTransport> = ResourceService<Posts, T>;

impl<R, T> Clone for ResourceService<R, T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, T> fmt::Debug for ResourceService<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService").field("path", &R::PATH).finish()
    }
}

impl<R: Resource, T: Transport> ResourceService<R, T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        R::PATH
    }

    fn item_path(id: u64) -> String {
        format!("{}/{id}", R::PATH)
    }

    /// Every entity in the collection, in the order the server returns them.
    pub async fn list(&self) -> Result<ApiResponse<Vec<R::Entity>>, ApiError> {
        self.client.get(R::PATH, RequestOptions::new()).await
    }

    /// Fails with `ApiError::HttpStatus` 404 when the id is unknown.
    pub async fn get(&self, id: u64) -> Result<ApiResponse<R::Entity>, ApiError> {
        self.client.get(&Self::item_path(id), RequestOptions::new()).await
    }

    /// The collection filtered server-side by `?{field}={value}`. The result
    /// is returned as received, not re-filtered.
    pub async fn filter_by_field(
        &self,
        field: &str,
        value: impl ToString,
    ) -> Result<ApiResponse<Vec<R::Entity>>, ApiError> {
        let options = RequestOptions::new().query(field, value);
        self.client.get(R::PATH, options).await
    }

    /// POST to the collection. The returned entity carries the id the server
    /// assigned; the fixture API does not keep it.
    pub async fn create(&self, payload: &R::Create) -> Result<ApiResponse<R::Entity>, ApiError> {
        self.client.post(R::PATH, payload, RequestOptions::new()).await
    }

    /// PUT a full replacement.
    pub async fn replace(&self, id: u64, payload: &R::Create) -> Result<ApiResponse<R::Entity>, ApiError> {
        self.client
            .put(&Self::item_path(id), payload, RequestOptions::new())
            .await
    }

    /// PATCH only the fields present in `payload`.
    pub async fn partial_update(
        &self,
        id: u64,
        payload: &R::Update,
    ) -> Result<ApiResponse<R::Entity>, ApiError> {
        self.client
            .patch(&Self::item_path(id), payload, RequestOptions::new())
            .await
    }

    /// Any response body is discarded. A 200 here does not mean a later
    /// `get` will return 404.
    pub async fn delete(&self, id: u64) -> Result<ApiResponse<()>, ApiError> {
        let response: ApiResponse<IgnoredAny> = self
            .client
            .delete(&Self::item_path(id), RequestOptions::new())
            .await?;
        Ok(response.map(|_| ()))
    }
}

impl<T: Transport> ResourceService<Posts, T> {
    /// Posts written by `user_id`.
    pub async fn by_user(&self, user_id: u64) -> Result<ApiResponse<Vec<Post>>, ApiError> {
        self.filter_by_field("userId", user_id).await
    }
}

/// Both services over one shared client. Build once at startup and pass
/// around by reference.
#[derive(Debug)]
pub struct Services<T = DefaultTransport> {
    pub users: UserService<T>,
    pub posts: PostService<T>,
}

impl Services<DefaultTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }
}

impl<T: Transport> Services<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        let client = Arc::new(client);
        Self {
            users: ResourceService::new(Arc::clone(&client)),
            posts: ResourceService::new(client),
        }
    }
}
