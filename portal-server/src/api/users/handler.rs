//! User API Handlers
//!
//! Every handler evaluates the access policy (operation level, then item
//! level where required) before touching the repository, and runs the
//! after-operation hook once the mutation has committed.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::UserInfo;

use crate::audit::UserOperation;
use crate::auth::{CurrentUser, policy};
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// List users visible to the session
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<UserInfo>>> {
    let session = Some(&user);
    if !policy::can_query(session) {
        return Err(AppError::unauthorized());
    }

    let repo = UserRepository::new(state.get_db());
    let users = match policy::query_scope(session) {
        policy::QueryScope::All => repo.find_all().await?,
        policy::QueryScope::OwnOnly(own_id) => {
            repo.find_by_id(&own_id).await?.into_iter().collect()
        }
        policy::QueryScope::None => Vec::new(),
    };

    Ok(Json(users.iter().map(|u| u.to_info()).collect()))
}

/// Get user by id (404 outside the session's scope)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserInfo>> {
    let session = Some(&user);
    if !policy::can_query(session) {
        return Err(AppError::unauthorized());
    }

    // 范围外的记录一律 404，不暴露存在性
    match policy::query_scope(session) {
        policy::QueryScope::All => {}
        policy::QueryScope::OwnOnly(own_id) if own_id == id => {}
        _ => return Err(AppError::not_found(format!("User {} not found", id))),
    }

    let repo = UserRepository::new(state.get_db());
    let found = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    Ok(Json(found.to_info()))
}

/// Create a user (admin-like sessions only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(data): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    if !policy::can_create(Some(&user)) {
        return Err(AppError::forbidden(
            "Only administrative sessions may create users".to_string(),
        ));
    }

    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_email(&data.email)?;
    validate_password(&data.password)?;

    let repo = UserRepository::new(state.get_db());
    let created = repo.create(data).await?;

    tracing::info!(
        user_id = %created.id_string(),
        email = %created.email,
        actor = %user.id,
        "User created"
    );

    state
        .hooks
        .after_operation(UserOperation::Create, Some(&created), None)
        .await;

    Ok(Json(created.to_info()))
}

/// Update a user (admin-like, or a student updating their own record)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(data): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    let session = Some(&user);

    // operation 层
    if !policy::can_update(session) {
        return Err(AppError::forbidden(
            "Session may not update users".to_string(),
        ));
    }

    let repo = UserRepository::new(state.get_db());
    let original = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    // item 层：学生只能改自己的记录
    if !policy::can_update_item(session, &original.id_string()) {
        return Err(AppError::forbidden(
            "Session may not update this record".to_string(),
        ));
    }

    // 角色/标志字段仅管理类会话可改（自助会话不得自我提权）
    if !user.is_admin_like() && data.touches_privileged_fields() {
        return Err(AppError::forbidden(
            "Session may not change role or account flags".to_string(),
        ));
    }

    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref email) = data.email {
        validate_email(email)?;
    }
    if let Some(ref password) = data.password {
        validate_password(password)?;
    }

    let updated = repo.update(&id, data).await?;

    tracing::info!(
        user_id = %updated.id_string(),
        actor = %user.id,
        "User updated"
    );

    state
        .hooks
        .after_operation(UserOperation::Update, Some(&updated), Some(&original))
        .await;

    Ok(Json(updated.to_info()))
}

/// Delete a user (admin-like sessions only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<()>> {
    let session = Some(&user);

    if !policy::can_delete(session) || !policy::can_delete_item(session, &id) {
        return Err(AppError::forbidden(
            "Only administrative sessions may delete users".to_string(),
        ));
    }

    let repo = UserRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;

    tracing::info!(
        user_id = %deleted.id_string(),
        actor = %user.id,
        "User deleted"
    );

    // item 在删除后已不存在，钩子回退到变更前记录的 id
    state
        .hooks
        .after_operation(UserOperation::Delete, None, Some(&deleted))
        .await;

    Ok(Json(()))
}
