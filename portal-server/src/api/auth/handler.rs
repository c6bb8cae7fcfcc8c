//! Authentication Handlers
//!
//! Handles login and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let email = req.email.clone();

    let user = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(format!("Query failed: {}", e)))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent email enumeration
    let user = match user {
        Some(u) => {
            // User found - check active status
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            // Verify password
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid("Invalid email or password".to_string()));
            }

            u
        }
        None => {
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid("Invalid email or password".to_string()));
        }
    };

    // Generate JWT token
    let jwt_service = state.get_jwt_service();
    let user_id = user.id_string();

    let token = jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    // Refresh last login timestamp (response carries the previous one)
    if let Err(e) = repo.touch_last_login(&user_id).await {
        tracing::warn!(user_id = %user_id, error = %e, "Failed to refresh last_login_date");
    }

    tracing::info!(
        user_id = %user_id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    let response = LoginResponse {
        token,
        user: user.to_info(),
    };

    Ok(Json(response))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    // Query fresh user data from database
    let repo = UserRepository::new(state.get_db());
    let fresh = repo
        .find_by_id(&user.id)
        .await
        .map_err(|e| AppError::database(format!("Failed to query user: {}", e)))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;

    Ok(Json(fresh.to_info()))
}
