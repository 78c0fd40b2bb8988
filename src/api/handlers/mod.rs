use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
///
/// Constraint violations (e.g. re-registering an email) are input problems
/// and come back as BAD_REQUEST with the driver's message.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();

    if msg.contains("UNIQUE constraint") || msg.contains("FOREIGN KEY constraint") {
        tracing::warn!("Constraint violation: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {}", msg);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Accounts
// ============================================================

pub async fn signup(
    State(db): State<Database>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<User>), (StatusCode, String)> {
    // Presence checks only; anything non-empty is accepted as-is.
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.password.trim().is_empty()
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "name, password and email are required".to_string(),
        ));
    }

    db.create_user(input)
        .map(|u| (StatusCode::CREATED, Json(u)))
        .map_err(internal_error)
}

/// Credentials check. Answers `"Success"` or `"Failure"` with a 200 either
/// way; a wrong password is a result, not an error.
pub async fn login(
    State(db): State<Database>,
    Json(input): Json<LoginInput>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let ok = db
        .verify_login(&input.email, &input.password)
        .map_err(internal_error)?;
    Ok(Json(if ok { "Success" } else { "Failure" }))
}

/// Query parameters for the uid lookup.
#[derive(Debug, Deserialize)]
pub struct UidQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UidResponse {
    pub uid: i64,
}

pub async fn get_uid(
    State(db): State<Database>,
    Query(query): Query<UidQuery>,
) -> Result<Json<UidResponse>, (StatusCode, String)> {
    db.get_uid(&query.email)
        .map_err(internal_error)?
        .map(|uid| Json(UidResponse { uid }))
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))
}

#[derive(Debug, Serialize)]
pub struct HouseholdIdResponse {
    pub household_id: i64,
}

pub async fn get_household_id(
    State(db): State<Database>,
    Path(uid): Path<i64>,
) -> Result<Json<HouseholdIdResponse>, (StatusCode, String)> {
    db.household_for_user(uid)
        .map_err(internal_error)?
        .map(|household_id| Json(HouseholdIdResponse { household_id }))
        .ok_or((StatusCode::NOT_FOUND, "Household not found".to_string()))
}

// ============================================================
// Tasks
// ============================================================

pub async fn create_task(
    State(db): State<Database>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<TaskRecord>), (StatusCode, String)> {
    if input.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "title is required".to_string()));
    }

    db.create_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error)
}

pub async fn list_household_tasks(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<TaskRecord>>, (StatusCode, String)> {
    db.get_tasks_for_household(id)
        .map(Json)
        .map_err(internal_error)
}

// ============================================================
// Households
// ============================================================

pub async fn new_household(
    State(db): State<Database>,
    Json(input): Json<NewHouseholdInput>,
) -> Result<(StatusCode, Json<Household>), (StatusCode, String)> {
    db.create_household(input)
        .map(|h| (StatusCode::CREATED, Json(h)))
        .map_err(internal_error)
}

pub async fn join_household(
    State(db): State<Database>,
    Json(input): Json<JoinHouseholdInput>,
) -> Result<StatusCode, (StatusCode, String)> {
    db.join_household(input.uid, input.household_id)
        .map(|_| StatusCode::CREATED)
        .map_err(internal_error)
}

pub async fn my_address(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Household>, (StatusCode, String)> {
    db.get_household_address(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Household not found".to_string()))
}

// ============================================================
// Appliances
// ============================================================

pub async fn add_appliance(
    State(db): State<Database>,
    Json(input): Json<AddApplianceInput>,
) -> Result<(StatusCode, Json<Appliance>), (StatusCode, String)> {
    db.add_appliance(input)
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(internal_error)
}
