use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, jwt::JwtKeys, password::hash_password},
    response::{ApiError, Envelope},
    state::AppState,
    users::{
        dto::{CreatedUser, ListQuery},
        repo::{User, UserListItem},
        validate::{validate_user, ValidationMode},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", put(update_user).delete(delete_user))
}

/// `skip` is a 1-indexed page number; anything before page one clamps to
/// offset zero.
fn page_offset(limit: i64, skip: i64) -> i64 {
    limit.saturating_mul(skip - 1).max(0)
}

#[instrument(skip(state))]
async fn list_users(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<UserListItem>>>, ApiError> {
    let limit = q.limit.max(0);
    let users = User::list(&state.db, limit, page_offset(limit, q.skip)).await?;
    let total = User::count(&state.db).await?;

    // Fires for out-of-range pages too, not only an empty collection.
    if users.is_empty() {
        return Err(ApiError::warning(StatusCode::NOT_FOUND, "No users found."));
    }

    Ok(Json(Envelope::success("All users", users).with_total(total)))
}

#[instrument(skip(state, body))]
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<CreatedUser>>), ApiError> {
    let payload = validate_user(&body, ValidationMode::Create)
        .map_err(|msg| ApiError::error(StatusCode::BAD_REQUEST, msg))?;

    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        return Err(username_taken());
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "password hashing failed");
        ApiError::server_error()
    })?;

    // Check-then-insert is not atomic; the unique index backstops the
    // race and the loser reports the same conflict.
    let user = User::insert(&state.db, &payload, &hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                username_taken()
            } else {
                e.into()
            }
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.username).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::server_error()
    })?;

    info!(user_id = %user.id, username = %user.username, "user created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("User created", CreatedUser { user, token })),
    ))
}

#[instrument(skip(state, body))]
async fn update_user(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let payload = validate_user(&body, ValidationMode::Update)
        .map_err(|msg| ApiError::error(StatusCode::BAD_REQUEST, msg))?;

    let stored = User::password_by_id(&state.db, id)
        .await?
        .ok_or_else(user_not_found)?;

    // Re-hash only a changed password; a payload echoing the stored hash
    // keeps it as-is.
    let hash = if payload.password == stored {
        stored
    } else {
        hash_password(&payload.password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            ApiError::server_error()
        })?
    };

    let user = User::replace(&state.db, id, &payload, &hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                username_taken()
            } else {
                e.into()
            }
        })?
        .ok_or_else(user_not_found)?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(Envelope::success("User updated", user)))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let user = User::delete(&state.db, id)
        .await?
        .ok_or_else(user_not_found)?;

    info!(user_id = %user.id, "user deleted");
    Ok(Json(Envelope::success("User deleted", user)))
}

fn username_taken() -> ApiError {
    ApiError::warning(StatusCode::BAD_REQUEST, "Username already in use")
}

fn user_not_found() -> ApiError {
    ApiError::warning(StatusCode::NOT_FOUND, "User not found")
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
