//! Company (tenant) management. Admin-only.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::{AccountView, Company};
use crate::state::SharedState;
use crate::store::companies;

#[derive(Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default = "default_subscription")]
    pub subscription_type: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

fn default_subscription() -> String {
    "monthly".to_string()
}

#[derive(Deserialize)]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct BrandingRequest {
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
}

#[derive(Serialize)]
pub struct SubscriptionStatus {
    pub id: u64,
    pub active: bool,
}

pub async fn list(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<Vec<Company>>, AppError> {
    auth.require_admin()?;
    Ok(Json(companies::list(&state.store).await?))
}

pub async fn create(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<Json<Company>, AppError> {
    auth.require_admin()?;
    let company = companies::create(
        &state.store,
        &req.name,
        &req.subscription_type,
        req.start_date,
        req.expiration_date,
    )
    .await?;
    Ok(Json(company))
}

pub async fn get(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<Company>, AppError> {
    auth.require_admin()?;
    Ok(Json(companies::get(&state.store, id).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;
    companies::delete(&state.store, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

pub async fn update_subscription(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<Company>, AppError> {
    auth.require_admin()?;
    let company = companies::update_subscription(
        &state.store,
        id,
        req.subscription_type.as_deref(),
        req.start_date,
        req.expiration_date,
    )
    .await?;
    Ok(Json(company))
}

pub async fn set_enabled(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
    Json(req): Json<EnabledRequest>,
) -> Result<Json<Company>, AppError> {
    auth.require_admin()?;
    Ok(Json(companies::set_enabled(&state.store, id, req.enabled).await?))
}

pub async fn update_branding(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
    Json(req): Json<BrandingRequest>,
) -> Result<Json<Company>, AppError> {
    auth.require_admin()?;
    let company = companies::update_branding(
        &state.store,
        id,
        req.logo_path,
        req.background_color,
        req.button_color,
    )
    .await?;
    Ok(Json(company))
}

pub async fn list_members(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<Vec<AccountView>>, AppError> {
    auth.require_admin()?;
    Ok(Json(companies::list_users_of(&state.store, id).await?))
}

pub async fn subscription_status(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<SubscriptionStatus>, AppError> {
    auth.require_admin()?;
    companies::get(&state.store, id).await?;
    let active = companies::is_subscription_active(&state.store, id).await?;
    Ok(Json(SubscriptionStatus { id, active }))
}
