use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated post. Immutable after creation except deletion; `user_id` is
/// the author's username and is not referentially enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub user_id: String,
    pub date: DateTime<Utc>,
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
