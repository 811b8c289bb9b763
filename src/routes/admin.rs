//! Admin workflow: account management, post management, dashboard stats,
//! and analytics. Every handler is gated on the Admin role.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::{AccountView, PostRecord, UserActivity};
use crate::routes::posts::posts_csv;
use crate::state::SharedState;
use crate::store::accounts::{self, NewAccount};
use crate::store::posts::{self, Analytics, OverallStats};

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company_id: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Deserialize)]
pub struct TierRequest {
    pub tier: String,
}

#[derive(Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Deserialize)]
pub struct CompanyAssignRequest {
    pub company_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

// ── Accounts ────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<Vec<AccountView>>, AppError> {
    auth.require_admin()?;
    Ok(Json(accounts::list(&state.store).await?))
}

pub async fn create_user(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    let user = accounts::create(
        &state.store,
        NewAccount {
            username: &req.username,
            password: &req.password,
            enabled: req.enabled,
            email: &req.email,
            tier: &req.tier,
            role: &req.role,
            company_id: req.company_id,
        },
    )
    .await?;
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    Ok(Json(accounts::get(&state.store, &username).await?))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;
    accounts::delete(&state.store, &username).await?;
    Ok(Json(serde_json::json!({ "deleted": username })))
}

pub async fn update_user_tier(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<TierRequest>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    accounts::update_tier(&state.store, &username, &req.tier).await?;
    Ok(Json(accounts::get(&state.store, &username).await?))
}

pub async fn update_user_role(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    accounts::update_role(&state.store, &username, &req.role).await?;
    Ok(Json(accounts::get(&state.store, &username).await?))
}

pub async fn update_user_company(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<CompanyAssignRequest>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    accounts::update_company(&state.store, &username, req.company_id).await?;
    Ok(Json(accounts::get(&state.store, &username).await?))
}

pub async fn update_user_enabled(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<EnabledRequest>,
) -> Result<Json<AccountView>, AppError> {
    auth.require_admin()?;
    accounts::set_enabled(&state.store, &username, req.enabled).await?;
    Ok(Json(accounts::get(&state.store, &username).await?))
}

pub async fn reset_user_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<PasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;
    accounts::update_password(&state.store, &username, &req.password).await?;
    Ok(Json(serde_json::json!({ "updated": username })))
}

// ── Posts & analytics ───────────────────────────────────────────

pub async fn list_posts(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostRecord>>, AppError> {
    auth.require_admin()?;
    Ok(Json(posts::list_all(&state.store, query.limit).await?))
}

/// Deleting an id that no longer exists is a no-op, mirroring how the
/// store treats it.
pub async fn delete_post(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;
    posts::delete(&state.store, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

pub async fn overall_stats(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<OverallStats>, AppError> {
    auth.require_admin()?;
    Ok(Json(posts::overall_stats(&state.store).await?))
}

pub async fn analytics(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<Analytics>, AppError> {
    auth.require_admin()?;
    Ok(Json(posts::analytics(&state.store).await?))
}

pub async fn export_analytics(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    let records = posts::list_all(&state.store, None).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"analytics.csv\"",
            ),
        ],
        posts_csv(&records),
    ))
}

pub async fn list_activity(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserActivity>>, AppError> {
    auth.require_admin()?;
    Ok(Json(posts::list_activity(&state.store).await?))
}
