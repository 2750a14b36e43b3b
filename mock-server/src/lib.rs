//! In-process stand-in for the public users/posts fixture API.
//!
//! Serves a seeded dataset with the same echo semantics as the public
//! service: writes answer as if they succeeded but nothing is stored, so a
//! read after a write always sees the seed data.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::debug;

const SEED: &str = include_str!("../data/db.json");

/// Immutable records served by the fixture, in id order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    pub users: Vec<Value>,
    pub posts: Vec<Value>,
}

impl Fixture {
    /// The bundled dataset: three users and six posts.
    pub fn seeded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(SEED)
    }

    fn collection(&self, name: &str) -> Option<&[Value]> {
        match name {
            "users" => Some(&self.users),
            "posts" => Some(&self.posts),
            _ => None,
        }
    }
}

pub type Db = Arc<Fixture>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Result<Router, serde_json::Error> {
    Ok(router(Fixture::seeded()?))
}

pub fn router(fixture: Fixture) -> Router {
    let db: Db = Arc::new(fixture);
    Router::new()
        .route("/{resource}", get(list).post(create))
        .route(
            "/{resource}/{id}",
            get(fetch).put(replace).patch(patch).delete(remove),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let app = app().map_err(std::io::Error::other)?;
    axum::serve(listener, app).await
}

fn not_found() -> Reply {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

fn find<'a>(records: &'a [Value], id: &str) -> Option<&'a Value> {
    let id: u64 = id.parse().ok()?;
    records.iter().find(|r| r["id"].as_u64() == Some(id))
}

/// Query values arrive as strings; compare against the string form of the
/// field so `userId=1` matches the number 1.
fn field_matches(record: &Value, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}

fn with_id(body: Value, id: u64) -> Value {
    match body {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), json!(id));
            Value::Object(fields)
        }
        _ => json!({ "id": id }),
    }
}

async fn list(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Reply {
    let Some(records) = db.collection(&resource) else {
        return not_found();
    };
    let matching: Vec<Value> = records
        .iter()
        .filter(|r| filters.iter().all(|(k, v)| field_matches(r, k, v)))
        .cloned()
        .collect();
    debug!(%resource, count = matching.len(), "list");
    (StatusCode::OK, Json(Value::Array(matching)))
}

async fn create(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(records) = db.collection(&resource) else {
        return not_found();
    };
    let id = records.len() as u64 + 1;
    debug!(%resource, id, "create (not stored)");
    (StatusCode::CREATED, Json(with_id(body, id)))
}

async fn fetch(State(db): State<Db>, Path((resource, id)): Path<(String, String)>) -> Reply {
    match db.collection(&resource).and_then(|records| find(records, &id)) {
        Some(record) => (StatusCode::OK, Json(record.clone())),
        None => not_found(),
    }
}

async fn replace(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(existing) = db.collection(&resource).and_then(|records| find(records, &id)) else {
        return not_found();
    };
    let id = existing["id"].as_u64().unwrap_or_default();
    (StatusCode::OK, Json(with_id(body, id)))
}

async fn patch(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(existing) = db.collection(&resource).and_then(|records| find(records, &id)) else {
        return not_found();
    };
    let mut merged: Map<String, Value> = existing.as_object().cloned().unwrap_or_default();
    if let Value::Object(changes) = body {
        for (key, value) in changes {
            if key != "id" {
                merged.insert(key, value);
            }
        }
    }
    (StatusCode::OK, Json(Value::Object(merged)))
}

async fn remove(State(db): State<Db>, Path((resource, _id)): Path<(String, String)>) -> Reply {
    if db.collection(&resource).is_none() {
        return not_found();
    }
    debug!(%resource, "delete (not applied)");
    (StatusCode::OK, Json(json!({})))
}
