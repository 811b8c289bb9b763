//! Post collection operations, plus the legacy per-author activity
//! collection (`users.json`) that is upserted alongside every new post.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{PostRecord, UserActivity};
use crate::store::{ACTIVITY_FILE, POSTS_FILE, Store};

pub struct NewPost {
    pub user_id: String,
    pub topic: String,
    pub purpose: String,
    pub audience: String,
    pub message: String,
    pub tone_intensity: String,
    pub language_style: String,
    pub post_length: String,
    pub formatting: String,
    pub cta: String,
    pub post_goal: String,
    pub generated_post: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct UserStats {
    pub total_posts: u64,
    pub posts_today: u64,
    pub posts_week: u64,
}

#[derive(Debug, Serialize)]
pub struct OverallStats {
    pub total_users: u64,
    pub total_posts: u64,
    pub posts_today: u64,
    pub posts_week: u64,
}

#[derive(Debug, Serialize)]
pub struct Analytics {
    pub posts_by_goal: BTreeMap<String, u64>,
    pub posts_by_length: BTreeMap<String, u64>,
    pub all_posts: Vec<PostRecord>,
}

/// Append a post with an id from the persisted sequence, then upsert the
/// author's activity record.
pub async fn create(store: &Store, new: NewPost) -> Result<PostRecord, AppError> {
    let _guard = store.posts_lock.lock().await;

    let id = store.next_sequence("posts").await?;
    let now = Utc::now();
    let record = PostRecord {
        id,
        user_id: new.user_id,
        date: now,
        topic: new.topic,
        purpose: new.purpose,
        audience: new.audience,
        message: new.message,
        tone_intensity: new.tone_intensity,
        language_style: new.language_style,
        post_length: new.post_length,
        formatting: new.formatting,
        cta: new.cta,
        post_goal: new.post_goal,
        generated_post: new.generated_post,
    };

    let mut posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    posts.push(record.clone());
    store.write_collection(POSTS_FILE, &posts).await?;

    let mut activity: Vec<UserActivity> = store.read_collection(ACTIVITY_FILE).await?;
    match activity.iter_mut().find(|a| a.user_id == record.user_id) {
        Some(entry) => {
            entry.post_count += 1;
            entry.last_post_date = now;
        }
        None => activity.push(UserActivity {
            user_id: record.user_id.clone(),
            post_count: 1,
            created_date: now,
            last_post_date: now,
        }),
    }
    store.write_collection(ACTIVITY_FILE, &activity).await?;

    Ok(record)
}

pub async fn list_all(store: &Store, limit: Option<usize>) -> Result<Vec<PostRecord>, AppError> {
    let mut posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        posts.truncate(limit);
    }
    Ok(posts)
}

pub async fn list_for_user(
    store: &Store,
    user_id: &str,
    limit: Option<usize>,
) -> Result<Vec<PostRecord>, AppError> {
    let posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    let mut posts: Vec<PostRecord> = posts.into_iter().filter(|p| p.user_id == user_id).collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        posts.truncate(limit);
    }
    Ok(posts)
}

/// Remove the post with the given id. Deleting an id that does not exist is
/// a no-op, as it always was.
pub async fn delete(store: &Store, id: u64) -> Result<(), AppError> {
    let _guard = store.posts_lock.lock().await;
    let mut posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    posts.retain(|p| p.id != id);
    store.write_collection(POSTS_FILE, &posts).await?;
    Ok(())
}

/// Posting volume for one author: lifetime, calendar-today, and the last
/// seven calendar days.
pub async fn user_stats(store: &Store, user_id: &str) -> Result<UserStats, AppError> {
    let posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    let today = Utc::now().date_naive();
    let week_ago = today - Duration::days(7);

    let mut stats = UserStats {
        total_posts: 0,
        posts_today: 0,
        posts_week: 0,
    };
    for post in posts.iter().filter(|p| p.user_id == user_id) {
        stats.total_posts += 1;
        let day = post.date.date_naive();
        if day == today {
            stats.posts_today += 1;
        }
        if day >= week_ago {
            stats.posts_week += 1;
        }
    }
    Ok(stats)
}

pub async fn overall_stats(store: &Store) -> Result<OverallStats, AppError> {
    let posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    let activity: Vec<UserActivity> = store.read_collection(ACTIVITY_FILE).await?;
    let today = Utc::now().date_naive();
    let week_ago = today - Duration::days(7);

    let mut stats = OverallStats {
        total_users: activity.len() as u64,
        total_posts: posts.len() as u64,
        posts_today: 0,
        posts_week: 0,
    };
    for post in &posts {
        let day = post.date.date_naive();
        if day == today {
            stats.posts_today += 1;
        }
        if day >= week_ago {
            stats.posts_week += 1;
        }
    }
    Ok(stats)
}

pub async fn analytics(store: &Store) -> Result<Analytics, AppError> {
    let posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;

    let mut posts_by_goal: BTreeMap<String, u64> = BTreeMap::new();
    let mut posts_by_length: BTreeMap<String, u64> = BTreeMap::new();
    for post in &posts {
        *posts_by_goal.entry(post.post_goal.clone()).or_default() += 1;
        *posts_by_length.entry(post.post_length.clone()).or_default() += 1;
    }

    Ok(Analytics {
        posts_by_goal,
        posts_by_length,
        all_posts: posts,
    })
}

/// Activity records with post counts recomputed from the posts collection,
/// so drift between the two files never shows up in the admin view.
pub async fn list_activity(store: &Store) -> Result<Vec<UserActivity>, AppError> {
    let mut activity: Vec<UserActivity> = store.read_collection(ACTIVITY_FILE).await?;
    let posts: Vec<PostRecord> = store.read_collection(POSTS_FILE).await?;
    for entry in &mut activity {
        entry.post_count = posts.iter().filter(|p| p.user_id == entry.user_id).count() as u64;
    }
    Ok(activity)
}
