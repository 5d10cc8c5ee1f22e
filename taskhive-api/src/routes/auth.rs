/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/signup` - Register a new user
/// - `POST /v1/auth/signin` - Sign in and receive an access token
///
/// # Errors
///
/// Signup: `400` on validation failure, `409` if the username is taken,
/// `500` on any other persistence failure. Signin: `401` for an unknown
/// username or a wrong password, with an identical message for both.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Credentials for signup and signin
#[derive(Debug, Deserialize, Validate)]
pub struct AuthCredentials {
    /// Username
    #[validate(length(min = 4, max = 20, message = "Username must be 4-20 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 8, max = 32, message = "Password must be 8-32 characters"))]
    pub password: String,
}

/// Signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    /// Access token (24h)
    pub access_token: String,
}

/// Signup handler
///
/// Generates a fresh salt, hashes the password with it, and persists the new
/// account. Responds 201 with no body.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<AuthCredentials>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    let salt = password::generate_salt();
    let password_hash = password::hash_password(&req.password, &salt)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
            salt,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    Ok(StatusCode::CREATED)
}

/// Signin handler
///
/// Verifies the password against the stored hash and issues an access token.
/// Unknown username and wrong password produce the same response.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<AuthCredentials>,
) -> ApiResult<Json<SigninResponse>> {
    req.validate()?;

    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let claims = jwt::Claims::new(user.id);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::debug!(user_id = %user.id, "User signed in");

    Ok(Json(SigninResponse { access_token }))
}
