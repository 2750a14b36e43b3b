//! Domain DTOs for the users and posts resources.
//!
//! # Design
//! Entities carry an optional `id` because the server assigns it: a value
//! built locally has none, a value read back from the API has one. Create
//! requests mark the fields the API needs as mandatory; update requests make
//! every field optional and omit absent ones from the JSON, so a PATCH body
//! contains exactly what the caller set. Field names are camelCase on the
//! wire.

use serde::{Deserialize, Serialize};

/// A user as returned by `/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates are strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// Payload for creating a user, and for replacing one with PUT.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl CreateUserRequest {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }
}

/// Partial update of a user. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A post as returned by `/posts`. `user_id` is not checked locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// Payload for creating a post, and for replacing one with PUT.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl CreatePostRequest {
    pub fn new(user_id: u64, title: &str, body: &str) -> Self {
        Self {
            user_id,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Partial update of a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_user_record_deserializes() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }))
        .unwrap();

        assert_eq!(user.id, Some(1));
        assert_eq!(user.address.unwrap().geo.lat, "-37.3159");
        assert_eq!(user.company.unwrap().catch_phrase, "Multi-layered client-server neural-net");
    }

    #[test]
    fn minimal_user_omits_absent_fields() {
        let user: User = serde_json::from_value(json!({"name": "Jane", "email": "jane@example.com"})).unwrap();
        assert_eq!(user.id, None);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, json!({"name": "Jane", "email": "jane@example.com"}));
    }

    #[test]
    fn user_requires_name_and_email() {
        assert!(serde_json::from_value::<User>(json!({"name": "No Email"})).is_err());
        assert!(serde_json::from_value::<CreateUserRequest>(json!({"email": "x@example.com"})).is_err());
    }

    #[test]
    fn update_request_sends_only_set_fields() {
        let patch = UpdateUserRequest {
            name: Some("Patched Name".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"name": "Patched Name"}));
        assert_eq!(
            serde_json::to_value(UpdatePostRequest::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn post_uses_camel_case_user_id() {
        let request = CreatePostRequest::new(7, "First Post", "Content of first post");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], 7);
        assert!(value.get("user_id").is_none());

        let post: Post = serde_json::from_value(json!({
            "userId": 7, "id": 101, "title": "First Post", "body": "Content of first post"
        }))
        .unwrap();
        assert_eq!(post.user_id, 7);
        assert_eq!(post.id, Some(101));
    }

    #[test]
    fn create_user_username_is_optional() {
        let request = CreateUserRequest::new("Post Author", "author@example.com");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Post Author", "email": "author@example.com"})
        );
        let request = request.with_username("author");
        assert_eq!(serde_json::to_value(&request).unwrap()["username"], "author");
    }
}
