//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Difficulty;

fn default_count() -> i64 { 5 }
fn default_max_points() -> i64 { 8 }

/// Body of `POST /generate/mcq`.
#[derive(Debug, Deserialize)]
pub struct McqIn {
    pub topic: String,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub context: Option<String>,
}

/// Body of `POST /generate/points`.
#[derive(Debug, Deserialize)]
pub struct PointsIn {
    pub topic: String,
    #[serde(default = "default_max_points")]
    pub max_points: i64,
    #[serde(default)]
    pub context: Option<String>,
}

/// Outcome tag carried in every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenStatus {
    Ok,
    ParseError,
}

/// Uniform response wrapper for both generation endpoints.
///
/// `result` stays an untyped `Value`: the interpreter is deliberately
/// permissive about the shape the model returns, so the envelope must not
/// force a schema the payload may not honor. Exactly one of `result` /
/// `raw_text` is present depending on `status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOut {
    pub request_id: String,
    pub status: GenStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl GenerateOut {
    pub fn ok(request_id: String, tokens_used: Option<u32>, result: Value) -> Self {
        Self { request_id, status: GenStatus::Ok, tokens_used, result: Some(result), raw_text: None }
    }

    pub fn parse_error(request_id: String, tokens_used: Option<u32>, raw_text: String) -> Self {
        Self { request_id, status: GenStatus::ParseError, tokens_used, result: None, raw_text: Some(raw_text) }
    }
}

/// Error body mirrored to callers on upstream failure (HTTP 500).
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub detail: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct RootOut {
    pub message: String,
}
