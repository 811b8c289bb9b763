use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-author posting activity, kept in `users.json` as its own collection.
/// This is deliberately separate from [`crate::models::Account`]: the two
/// are joined only by the username string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: String,
    pub post_count: u64,
    pub created_date: DateTime<Utc>,
    pub last_post_date: DateTime<Utc>,
}
