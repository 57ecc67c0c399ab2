//! Cafe handlers

use crate::error::{ApiError, NO_CAFES_YET, NO_CAFE_AT_LOCATION, NO_SUCH_CAFE};
use crate::storage::CafeOrder;
use crate::AppState;
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    Form, Json,
};
use cafe_types::{title_case, Cafe, CafeForm};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

pub async fn random(State(state): State<AppState>) -> Result<Json<Cafe>, ApiError> {
    state
        .db
        .random_cafe()
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(NO_CAFES_YET))
}

pub async fn all(State(state): State<AppState>) -> Result<Json<Vec<Cafe>>, ApiError> {
    Ok(Json(state.db.list_cafes(CafeOrder::Id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    loc: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Cafe>>, ApiError> {
    let Query(params) = query?;
    let loc = required_param("loc", params.loc)?;

    let location = title_case(loc.trim());
    let cafes = state.db.find_by_location(&location).await?;

    if cafes.is_empty() {
        return Err(ApiError::NotFound(NO_CAFE_AT_LOCATION));
    }

    Ok(Json(cafes))
}

pub async fn add(
    State(state): State<AppState>,
    form: Result<Form<CafeForm>, FormRejection>,
) -> Result<Json<Value>, ApiError> {
    let Form(form) = form?;
    let cafe = form.into_new_cafe()?;

    let id = state.db.insert_cafe(&cafe).await?;
    info!("Added cafe {} ({}) in {}", id, cafe.name, cafe.location);

    Ok(Json(json!({ "response": "Successfully added new cafe." })))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceParams {
    id: Option<String>,
    new_price: Option<String>,
}

pub async fn update_price(
    State(state): State<AppState>,
    query: Result<Query<UpdatePriceParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let id = id_param(params.id)?;
    let new_price = required_param("new_price", params.new_price)?;

    if !state.db.update_coffee_price(id, &new_price).await? {
        return Err(ApiError::NotFound(NO_SUCH_CAFE));
    }

    info!("Updated coffee price of cafe {} to {}", id, new_price);

    Ok(Json(json!({ "success": "Coffee price updated successfully." })))
}

#[derive(Debug, Deserialize)]
pub struct ReportClosureParams {
    id: Option<String>,
    api_key: Option<String>,
}

pub async fn report_closure(
    State(state): State<AppState>,
    query: Result<Query<ReportClosureParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let id = id_param(params.id)?;

    // Existence is checked before the key
    if state.db.get_cafe(id).await?.is_none() {
        return Err(ApiError::NotFound(NO_SUCH_CAFE));
    }

    if !state.api_keys.verify(params.api_key.as_deref()) {
        warn!("Refused closure report for cafe {}: invalid API key", id);
        return Err(ApiError::Forbidden);
    }

    // Another request may have removed it in the meantime
    if !state.db.delete_cafe(id).await? {
        return Err(ApiError::NotFound(NO_SUCH_CAFE));
    }

    info!("Removed cafe {}", id);

    Ok(Json(json!({ "response": "Successfully removed cafe." })))
}

fn required_param(name: &str, value: Option<String>) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing query parameter: {name}")))
}

fn id_param(value: Option<String>) -> Result<i64, ApiError> {
    required_param("id", value)?
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid query parameter: id".to_string()))
}
