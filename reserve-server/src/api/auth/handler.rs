//! Authentication Handlers
//!
//! Registration, login and current-user lookup.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::AppError;
use crate::auth::{self, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{self, MAX_PASSWORD_LEN, MAX_USERNAME_LEN};
use shared::ErrorCode;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::Role;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub id: i64,
}

/// Register handler
///
/// Creates an account and stores the argon2 credential hash.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let username = req.username.trim();
    validation::validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    validation::validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let role = match req.role.as_deref() {
        None | Some("") => Role::Customer,
        Some(s) => Role::parse(s)
            .ok_or_else(|| AppError::validation(format!("unknown role: '{}'", s)))?,
    };

    let password_hash = auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let created = user::create(&state.pool, username, &password_hash, role)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::UsernameExists, msg)
            }
            other => other.into(),
        })?;

    tracing::info!(
        user_id = created.id,
        username = %created.username,
        role = %created.role,
        "User registered"
    );

    Ok(Json(RegisterResponse {
        ok: true,
        id: created.id,
    }))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = user::find_by_username(&state.pool, req.username.trim()).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error for unknown user and wrong password so usernames
    // cannot be enumerated
    let account = match account {
        Some(u) => {
            let password_valid = auth::verify_password(&req.password, &u.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(account.id, &account.username, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = account.id,
        username = %account.username,
        role = %account.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            username: account.username,
            role: account.role,
        },
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    // Query fresh account data; the token may outlive the row
    let account = user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(UserInfo {
        id: account.id,
        username: account.username,
        role: account.role,
    }))
}
