//! Structural validation of payloads against JSON Schemas.
//!
//! Schemas are compiled as draft 7, which checks `format` keywords such as
//! `email` and `date`. `validate` compiles on every call; hold on to a
//! `CompiledSchema` from `compile` when the same schema checks many payloads.

use jsonschema::{Draft, JSONSchema};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the payload, empty for the root.
    pub path: String,
    /// The schema keyword that failed, e.g. `required` or `format`.
    pub rule: String,
    /// What the schema expected.
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SchemaValidationError {
    #[error("schema validation failed: {}", summarize(.0))]
    Violations(Vec<Violation>),

    #[error("schema does not compile: {0}")]
    InvalidSchema(String),

    #[error("payload is not serializable: {0}")]
    Serialize(String),
}

impl SchemaValidationError {
    /// Violations in the order the validator reported them; empty for the
    /// other variants.
    pub fn violations(&self) -> &[Violation] {
        match self {
            SchemaValidationError::Violations(v) => v,
            _ => &[],
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| {
            let path = if v.path.is_empty() { "/" } else { v.path.as_str() };
            format!("{path} ({}): {}", v.rule, v.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A schema compiled once for repeated use.
pub struct CompiledSchema {
    inner: JSONSchema,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema").finish_non_exhaustive()
    }
}

impl CompiledSchema {
    /// `Ok(true)` when `data` conforms; otherwise every violation found.
    pub fn validate<T: Serialize + ?Sized>(&self, data: &T) -> Result<bool, SchemaValidationError> {
        let instance = serde_json::to_value(data).map_err(|e| SchemaValidationError::Serialize(e.to_string()))?;
        self.validate_value(&instance)
    }

    pub fn validate_value(&self, instance: &Value) -> Result<bool, SchemaValidationError> {
        match self.inner.validate(instance) {
            Ok(()) => Ok(true),
            Err(errors) => {
                let violations = errors
                    .map(|err| {
                        let schema_path = err.schema_path.to_string();
                        Violation {
                            path: err.instance_path.to_string(),
                            rule: schema_path.rsplit('/').next().unwrap_or_default().to_string(),
                            message: err.to_string(),
                        }
                    })
                    .collect();
                Err(SchemaValidationError::Violations(violations))
            }
        }
    }

    pub fn is_valid<T: Serialize + ?Sized>(&self, data: &T) -> bool {
        serde_json::to_value(data)
            .map(|instance| self.inner.is_valid(&instance))
            .unwrap_or(false)
    }
}

pub fn compile(schema: &Value) -> Result<CompiledSchema, SchemaValidationError> {
    let inner = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| SchemaValidationError::InvalidSchema(e.to_string()))?;
    Ok(CompiledSchema { inner })
}

/// Compile `schema` and validate `data` against it.
pub fn validate<T: Serialize + ?Sized>(data: &T, schema: &Value) -> Result<bool, SchemaValidationError> {
    compile(schema)?.validate(data)
}

/// Schemas for the entities the API returns.
pub mod schemas {
    use serde_json::Value;

    const USER: &str = include_str!("../schemas/user.schema.json");
    const POST: &str = include_str!("../schemas/post.schema.json");

    pub fn user() -> Value {
        parse(USER)
    }

    pub fn post() -> Value {
        parse(POST)
    }

    fn parse(raw: &str) -> Value {
        // A null schema fails to compile, so a broken file surfaces as
        // `InvalidSchema` at the first validation.
        serde_json::from_str(raw).unwrap_or(Value::Null)
    }
}
