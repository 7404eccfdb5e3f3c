//! Collection endpoints. One set of handlers serves every resource; the
//! `:resource` path segment selects the collection.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use common::types::Ack;
use models::{Collection, Record};
use serde_json::Value;
use service::storage::FindMany;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::authorize;
use crate::state::ServerState;

fn collection(resource: &str) -> Result<Collection, JsonApiError> {
    Collection::from_resource(resource)
        .ok_or_else(|| JsonApiError::not_found(format!("unknown resource `{resource}`")))
}

fn body(payload: Result<Json<Record>, JsonRejection>) -> Result<Record, JsonApiError> {
    payload
        .map(|Json(r)| r)
        .map_err(|e| JsonApiError::bad_request(e.body_text()))
}

fn query(params: &HashMap<String, String>) -> Result<FindMany, JsonApiError> {
    Ok(FindMany::from_query(params)?)
}

// ---- public surface -------------------------------------------------------

/// `GET /api/:resource`: fallback-backed listing, the single object for
/// `about`/`settings`, admin-only for private collections.
pub async fn public_list(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, JsonApiError> {
    let c = collection(&resource)?;
    if c.is_private() {
        authorize(&state, &headers)?;
        let rows = state.content.admin_list(c, &query(&params)?).await?;
        return Ok(Json(Value::Array(rows.into_iter().map(Value::Object).collect())));
    }
    if c.is_singleton() {
        return Ok(Json(state.content.singleton(c).await));
    }
    Ok(Json(state.content.public_list(c, &query(&params)?).await))
}

/// `GET /api/:resource/:id`
pub async fn public_get(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
    headers: HeaderMap,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    if c.is_private() {
        authorize(&state, &headers)?;
    }
    Ok(Json(state.content.get(c, id).await?))
}

/// `POST /api/:resource`: contact submissions are open to everyone, every
/// other collection needs an admin token.
pub async fn public_create(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    if c != Collection::ContactSubmissions {
        authorize(&state, &headers)?;
    }
    let data = body(payload)?;
    create_record(&state, c, data).await
}

/// `PUT /api/:resource/:id`
pub async fn public_update(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
    headers: HeaderMap,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    authorize(&state, &headers)?;
    let c = collection(&resource)?;
    Ok(Json(state.content.update(c, id, body(payload)?).await?))
}

/// `DELETE /api/:resource/:id`
pub async fn public_delete(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
    headers: HeaderMap,
) -> Result<Json<Ack>, JsonApiError> {
    authorize(&state, &headers)?;
    let c = collection(&resource)?;
    state.content.delete(c, id).await?;
    Ok(Json(Ack::ok()))
}

async fn create_record(state: &ServerState, c: Collection, data: Record) -> Result<Json<Record>, JsonApiError> {
    let created = if c.is_singleton() {
        state.content.upsert_singleton(c, data).await?
    } else {
        state.content.create(c, data).await?
    };
    info!(collection = %c, id = ?created.get("id"), "created via api");
    Ok(Json(created))
}

// ---- admin surface (behind `require_admin`) --------------------------------

/// `GET /api/admin/:resource`: raw rows, no fallback.
pub async fn admin_list(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Record>>, JsonApiError> {
    let c = collection(&resource)?;
    Ok(Json(state.content.admin_list(c, &query(&params)?).await?))
}

/// `POST /api/admin/:resource`
pub async fn admin_create(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    create_record(&state, c, body(payload)?).await
}

/// `PUT /api/admin/:resource`: upsert of `about`/`settings`.
pub async fn admin_upsert(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    if !c.is_singleton() {
        return Err(JsonApiError::bad_request(format!("`{resource}` needs an id: PUT /api/admin/{resource}/:id")));
    }
    Ok(Json(state.content.upsert_singleton(c, body(payload)?).await?))
}

/// `GET /api/admin/:resource/:id`
pub async fn admin_get(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    Ok(Json(state.content.get(c, id).await?))
}

/// `PUT /api/admin/:resource/:id`
pub async fn admin_update(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    let c = collection(&resource)?;
    Ok(Json(state.content.update(c, id, body(payload)?).await?))
}

/// `DELETE /api/admin/:resource/:id`
pub async fn admin_delete(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, u64)>,
) -> Result<Json<Ack>, JsonApiError> {
    let c = collection(&resource)?;
    state.content.delete(c, id).await?;
    Ok(Json(Ack::ok()))
}
