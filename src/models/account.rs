use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription level of an individual account, orthogonal to the
/// company-level subscription window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tier {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl Tier {
    /// Parse a tier name, falling back to `Basic` on anything unrecognized.
    pub fn from_input(s: &str) -> Self {
        match s {
            "Standard" => Tier::Standard,
            "Premium" => Tier::Premium,
            _ => Tier::Basic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
    Viewer,
}

impl Role {
    /// Parse a role name, falling back to `User` on anything unrecognized.
    pub fn from_input(s: &str) -> Self {
        match s {
            "Admin" => Role::Admin,
            "Viewer" => Role::Viewer,
            _ => Role::User,
        }
    }
}

/// A stored user account. Older records may predate the tier/role/company
/// fields, so those carry serde defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub enabled: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub company_id: Option<u64>,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Password-free projection of an account. Every read path that leaves the
/// store goes through this type so the hash never reaches a response body.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub username: String,
    pub enabled: bool,
    pub email: String,
    pub tier: Tier,
    pub role: Role,
    pub company_id: Option<u64>,
    pub created_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        AccountView {
            username: account.username.clone(),
            enabled: account.enabled,
            email: account.email.clone(),
            tier: account.tier,
            role: account.role,
            company_id: account.company_id,
            created_date: account.created_date,
            last_login: account.last_login,
        }
    }
}
