/// User endpoints
///
/// - `POST /users` - Sign up and receive a session token
/// - `POST /users/login` - Log in and receive a session token
/// - `GET /users/me` - The user behind the session token

use crate::{
    app::{AppState, Session},
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use lightbnb_shared::{
    auth::{
        jwt::{create_token, Claims},
        password,
    },
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to signup and login
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,

    /// Bearer token for authenticated routes
    pub token: String,
}

/// Registers a new user
///
/// The password is hashed with Argon2id before it reaches the database.
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password: password_hash,
        },
    )
    .await?;

    info!(user_id = %user.id, "User signed up");

    let token = session_token(&state, &user)?;
    Ok((StatusCode::CREATED, Json(SessionResponse { user, token })))
}

/// Logs a user in
///
/// Unknown emails and wrong passwords get the same 401, and both run one
/// Argon2 verification.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let Some(user) = User::find_by_email(&state.db, &req.email).await? else {
        // Same Argon2 cost as a wrong password.
        let _ = password::verify_password(&req.password, password::DUMMY_HASH);
        return Err(invalid());
    };

    let verified = password::verify_password(&req.password, &user.password).unwrap_or_else(|e| {
        warn!(user_id = %user.id, error = %e, "Stored password is not a valid hash");
        false
    });
    if !verified {
        return Err(invalid());
    }

    let token = session_token(&state, &user)?;
    Ok(Json(SessionResponse { user, token }))
}

/// Returns the current user
///
/// # Errors
///
/// - `404 Not Found`: The session's user no longer exists
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

fn session_token(state: &AppState, user: &User) -> ApiResult<String> {
    let claims = Claims::with_ttl_hours(user.id, state.config.jwt.ttl_hours)?;
    Ok(create_token(&claims, state.jwt_secret())?)
}
