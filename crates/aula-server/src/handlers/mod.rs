//! Request dispatch for the single `/api` route.
//!
//! The original boundary keys every operation on the `endpoint` query
//! parameter and the HTTP method, so one route family fans out here
//! instead of one axum route per resource.
//!
//! | Method   | Query                                  | Handler |
//! |----------|----------------------------------------|---------|
//! | `GET`    | `endpoint=rooms`                       | [`rooms::list`] |
//! | `GET`    | `endpoint=reservations[&id=N]`         | [`reservations::list`] / [`reservations::get_one`] |
//! | `GET`    | `endpoint=availability&roomId&date[&duration]` | [`availability::slots`] |
//! | `POST`   | `endpoint=reservations`                | [`reservations::create`] |
//! | `PUT`    | `endpoint=reservations&id=N`           | [`reservations::update`] |
//! | `DELETE` | `endpoint=reservations&id=N`           | [`reservations::delete`] |

pub mod availability;
pub mod reservations;
pub mod rooms;

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use aula_core::store::ReservationStore;

use crate::{AppState, error::ApiError};

/// Everything the `/api` route accepts in its query string.
#[derive(Debug, Deserialize)]
pub struct ApiParams {
  pub endpoint: Option<String>,
  pub id:       Option<i64>,
  #[serde(rename = "roomId")]
  pub room_id:  Option<String>,
  pub date:     Option<NaiveDate>,
  /// Requested duration in minutes for the availability endpoint.
  pub duration: Option<u32>,
}

fn invalid_endpoint() -> ApiError {
  ApiError::Validation("Invalid endpoint".to_string())
}

fn invalid_endpoint_or_id() -> ApiError {
  ApiError::Validation("Invalid endpoint or missing ID".to_string())
}

pub async fn dispatch_get<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ApiParams>,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore + Clone + Send + Sync + 'static,
{
  match params.endpoint.as_deref() {
    Some("rooms") => rooms::list(&state).await,
    Some("reservations") => match params.id {
      Some(id) => reservations::get_one(&state, id).await,
      None => reservations::list(&state).await,
    },
    Some("availability") => availability::slots(&state, &params).await,
    _ => Err(invalid_endpoint()),
  }
}

pub async fn dispatch_post<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ApiParams>,
  body: Result<Json<reservations::CreateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore + Clone + Send + Sync + 'static,
{
  // An absent or unparseable body reads as `{}`, so field validation in
  // the handler answers inside the envelope instead of an axum 4xx.
  let body = body.map(|Json(b)| b).unwrap_or_default();
  match params.endpoint.as_deref() {
    Some("reservations") => reservations::create(&state, body).await,
    _ => Err(invalid_endpoint()),
  }
}

pub async fn dispatch_put<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ApiParams>,
  body: Result<Json<aula_core::reservation::ReservationPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore + Clone + Send + Sync + 'static,
{
  // Same as POST: a bad body is an empty patch, caught by `is_empty`.
  let body = body.map(|Json(b)| b).unwrap_or_default();
  match (params.endpoint.as_deref(), params.id) {
    (Some("reservations"), Some(id)) => reservations::update(&state, id, body).await,
    _ => Err(invalid_endpoint_or_id()),
  }
}

pub async fn dispatch_delete<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ApiParams>,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore + Clone + Send + Sync + 'static,
{
  match (params.endpoint.as_deref(), params.id) {
    (Some("reservations"), Some(id)) => reservations::delete(&state, id).await,
    _ => Err(invalid_endpoint_or_id()),
  }
}
