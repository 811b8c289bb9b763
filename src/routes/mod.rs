pub mod admin;
pub mod auth;
pub mod branding;
pub mod companies;
pub mod posts;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/me", get(auth::me))
        // Branding
        .route("/api/v1/branding", get(branding::get))
        .route("/api/v1/admin/branding", put(branding::update))
        // User workflow
        .route("/api/v1/posts/generate", post(posts::generate))
        .route("/api/v1/posts", get(posts::list))
        .route("/api/v1/posts/export", get(posts::export))
        .route("/api/v1/posts/stats", get(posts::stats))
        // Admin: accounts
        .route(
            "/api/v1/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/api/v1/admin/users/{username}",
            get(admin::get_user).delete(admin::delete_user),
        )
        .route(
            "/api/v1/admin/users/{username}/tier",
            put(admin::update_user_tier),
        )
        .route(
            "/api/v1/admin/users/{username}/role",
            put(admin::update_user_role),
        )
        .route(
            "/api/v1/admin/users/{username}/company",
            put(admin::update_user_company),
        )
        .route(
            "/api/v1/admin/users/{username}/enabled",
            put(admin::update_user_enabled),
        )
        .route(
            "/api/v1/admin/users/{username}/password",
            post(admin::reset_user_password),
        )
        // Admin: companies
        .route(
            "/api/v1/admin/companies",
            get(companies::list).post(companies::create),
        )
        .route(
            "/api/v1/admin/companies/{id}",
            get(companies::get).delete(companies::delete),
        )
        .route(
            "/api/v1/admin/companies/{id}/subscription",
            put(companies::update_subscription),
        )
        .route(
            "/api/v1/admin/companies/{id}/subscription/status",
            get(companies::subscription_status),
        )
        .route(
            "/api/v1/admin/companies/{id}/enabled",
            put(companies::set_enabled),
        )
        .route(
            "/api/v1/admin/companies/{id}/branding",
            put(companies::update_branding),
        )
        .route(
            "/api/v1/admin/companies/{id}/users",
            get(companies::list_members),
        )
        // Admin: posts, stats, analytics
        .route("/api/v1/admin/posts", get(admin::list_posts))
        .route("/api/v1/admin/posts/{id}", delete(admin::delete_post))
        .route("/api/v1/admin/stats", get(admin::overall_stats))
        .route("/api/v1/admin/analytics", get(admin::analytics))
        .route(
            "/api/v1/admin/analytics/export",
            get(admin::export_analytics),
        )
        .route("/api/v1/admin/activity", get(admin::list_activity))
}
