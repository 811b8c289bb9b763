//! Branding configuration. Reads are public so both apps can theme their
//! login screens; writes are admin-only.

use axum::Json;
use axum::extract::State;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::Branding;
use crate::state::SharedState;
use crate::store::branding;

pub async fn get(State(state): State<SharedState>) -> Result<Json<Branding>, AppError> {
    Ok(Json(branding::load(&state.store).await?))
}

/// A partial body is fine: serde fills missing keys with the defaults, so
/// the stored file is always complete.
pub async fn update(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<Branding>,
) -> Result<Json<Branding>, AppError> {
    auth.require_admin()?;
    Ok(Json(branding::save(&state.store, req).await?))
}
