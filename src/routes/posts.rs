//! User-facing workflow: generate a post, browse and export history, view
//! posting stats.

use std::fmt::Write as _;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::r#gen::GenerateRequest;
use crate::r#gen::client;
use crate::models::PostRecord;
use crate::state::SharedState;
use crate::store::accounts;
use crate::store::companies;
use crate::store::posts::{self, NewPost, UserStats};

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub post: PostRecord,
    pub image_prompt: String,
}

/// Form input → validation → prompt → completion → save → respond. A
/// user whose company subscription has lapsed is turned away before any
/// completion call.
pub async fn generate(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let account = accounts::get(&state.store, &auth.username).await?;
    if let Some(company_id) = account.company_id
        && !companies::is_subscription_active(&state.store, company_id).await?
    {
        return Err(AppError::Forbidden(
            "Your company's subscription is not active".to_string(),
        ));
    }

    let generated = client::generate(state.completion.as_ref(), &req)
        .await
        .map_err(AppError::from)?;

    let record = posts::create(
        &state.store,
        NewPost {
            user_id: auth.username.clone(),
            topic: req.topic,
            purpose: req.purpose,
            audience: req.audience,
            message: req.message,
            tone_intensity: req.tone_intensity,
            language_style: req.language_style,
            post_length: req.post_length,
            formatting: req.formatting,
            cta: req.cta,
            post_goal: req.post_goal,
            generated_post: generated.post,
        },
    )
    .await?;

    Ok(Json(GenerateResponse {
        post: record,
        image_prompt: generated.image_prompt,
    }))
}

pub async fn list(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostRecord>>, AppError> {
    Ok(Json(
        posts::list_for_user(&state.store, &auth.username, query.limit).await?,
    ))
}

pub async fn stats(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<UserStats>, AppError> {
    Ok(Json(posts::user_stats(&state.store, &auth.username).await?))
}

pub async fn export(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let records = posts::list_for_user(&state.store, &auth.username, None).await?;
    let csv = posts_csv(&records);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"posts.csv\"",
            ),
        ],
        csv,
    ))
}

/// Render posts as CSV, one row per record, RFC 4180 quoting.
pub(crate) fn posts_csv(records: &[PostRecord]) -> String {
    let mut csv = String::new();
    let _ = writeln!(
        csv,
        "id,user_id,date,topic,purpose,audience,post_goal,post_length,generated_post"
    );
    for record in records {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{}",
            record.id,
            quote(&record.user_id),
            record.date.to_rfc3339(),
            quote(&record.topic),
            quote(&record.purpose),
            quote(&record.audience),
            quote(&record.post_goal),
            quote(&record.post_length),
            quote(&record.generated_post),
        );
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
