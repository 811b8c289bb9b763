use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    #[default]
    Monthly,
    Annual,
}

impl SubscriptionType {
    pub fn from_input(s: &str) -> Self {
        match s {
            "annual" => SubscriptionType::Annual,
            _ => SubscriptionType::Monthly,
        }
    }

    /// Default subscription window length for this billing type.
    pub fn default_window_days(self) -> i64 {
        match self {
            SubscriptionType::Monthly => 30,
            SubscriptionType::Annual => 365,
        }
    }
}

/// A tenant record. Company names are unique case-insensitively; ids are
/// assigned max+1 over the current collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub subscription_type: SubscriptionType,
    pub start_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub enabled: bool,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
}

impl Company {
    /// A subscription is active while the company is enabled and the
    /// expiration date is still in the future.
    pub fn subscription_active_at(&self, now: DateTime<Utc>) -> bool {
        self.enabled && now < self.expiration_date
    }
}
