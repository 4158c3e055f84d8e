//! The response envelope.
//!
//! Every API response is HTTP 200 with `{"status": "success"|"error"}` plus
//! optional `message`, `data`, `id`, and `conflict` fields. Logical failure
//! is signalled in the body, never via the HTTP status code.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

pub fn success_data<T: Serialize>(data: T) -> Json<Value> {
  Json(json!({ "status": "success", "data": data }))
}

pub fn success_message(message: &str) -> Json<Value> {
  Json(json!({ "status": "success", "message": message }))
}

pub fn success_created(message: &str, id: i64) -> Json<Value> {
  Json(json!({ "status": "success", "message": message, "id": id }))
}

pub fn error_message(message: &str) -> Json<Value> {
  Json(json!({ "status": "error", "message": message }))
}

pub fn error_conflict<T: Serialize>(message: &str, conflict: T) -> Json<Value> {
  Json(json!({ "status": "error", "message": message, "conflict": conflict }))
}
