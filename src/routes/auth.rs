use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::config::RegistrationMode;
use crate::error::AppError;
use crate::models::AccountView;
use crate::state::SharedState;
use crate::store::accounts::{self, NewAccount};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AccountView,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(access_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12))
        .build();
    CookieJar::new().add(access)
}

fn clear_auth_cookie() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access)
}

/// Self-serve registration. The very first account becomes the Admin;
/// afterwards registration follows the configured mode and always creates
/// plain User accounts.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let bootstrap = accounts::count(&state.store).await? == 0;
    if !bootstrap && state.config.registration == RegistrationMode::Closed {
        return Err(AppError::Forbidden(
            "Registration is disabled. Contact your administrator.".to_string(),
        ));
    }

    let user = accounts::create(
        &state.store,
        NewAccount {
            username: &req.username,
            password: &req.password,
            enabled: true,
            email: &req.email,
            tier: "Basic",
            role: if bootstrap { "Admin" } else { "User" },
            company_id: None,
        },
    )
    .await?;

    let claims = Claims::new(&user.username, user.role);
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!("Registered account {}", user.username);
    let jar = auth_cookie(&access_token);
    Ok((jar, Json(AuthResponse { access_token, user })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if state.login_limiter.check(&req.username).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = match accounts::authenticate(&state.store, &req.username, &req.password).await {
        Ok(user) => user,
        Err(err) => {
            if matches!(err, AppError::Unauthorized(_)) {
                state.login_limiter.record_failure(&req.username);
            }
            return Err(err);
        }
    };
    state.login_limiter.record_success(&req.username);

    let claims = Claims::new(&user.username, user.role);
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let jar = auth_cookie(&access_token);
    Ok((jar, Json(AuthResponse { access_token, user })))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_auth_cookie(),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    accounts::authenticate(&state.store, &auth.username, &req.current_password)
        .await
        .map_err(|_| AppError::Unauthorized("Current password is incorrect".to_string()))?;
    accounts::update_password(&state.store, &auth.username, &req.new_password).await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

pub async fn me(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<AccountView>, AppError> {
    Ok(Json(accounts::get(&state.store, &auth.username).await?))
}
