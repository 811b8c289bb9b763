//! Company collection operations. Company ids are assigned max+1 over the
//! current collection; names are unique case-insensitively.

use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;
use crate::models::{Account, AccountView, Company, SubscriptionType};
use crate::store::{ACCOUNTS_FILE, COMPANIES_FILE, Store};

pub async fn create(
    store: &Store,
    name: &str,
    subscription_type: &str,
    start_date: Option<DateTime<Utc>>,
    expiration_date: Option<DateTime<Utc>>,
) -> Result<Company, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Company name is required".to_string()));
    }

    let subscription_type = SubscriptionType::from_input(subscription_type);
    let start = start_date.unwrap_or_else(Utc::now);
    let expiration = expiration_date
        .unwrap_or_else(|| start + Duration::days(subscription_type.default_window_days()));

    let _guard = store.companies_lock.lock().await;
    let mut companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;

    if companies
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name))
    {
        return Err(AppError::Conflict("Company name already exists".to_string()));
    }

    let id = companies.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let company = Company {
        id,
        name: name.to_string(),
        subscription_type,
        start_date: start,
        expiration_date: expiration,
        enabled: true,
        created_date: Utc::now(),
        logo_path: None,
        background_color: None,
        button_color: None,
    };

    companies.push(company.clone());
    store.write_collection(COMPANIES_FILE, &companies).await?;
    Ok(company)
}

pub async fn get(store: &Store, id: u64) -> Result<Company, AppError> {
    let companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
    companies
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

pub async fn list(store: &Store) -> Result<Vec<Company>, AppError> {
    Ok(store.read_collection(COMPANIES_FILE).await?)
}

pub async fn update_subscription(
    store: &Store,
    id: u64,
    subscription_type: Option<&str>,
    start_date: Option<DateTime<Utc>>,
    expiration_date: Option<DateTime<Utc>>,
) -> Result<Company, AppError> {
    mutate(store, id, |company| {
        if let Some(kind) = subscription_type {
            company.subscription_type = SubscriptionType::from_input(kind);
        }
        if let Some(start) = start_date {
            company.start_date = start;
        }
        if let Some(expiration) = expiration_date {
            company.expiration_date = expiration;
        }
    })
    .await
}

pub async fn set_enabled(store: &Store, id: u64, enabled: bool) -> Result<Company, AppError> {
    mutate(store, id, |company| {
        company.enabled = enabled;
    })
    .await
}

pub async fn update_branding(
    store: &Store,
    id: u64,
    logo_path: Option<String>,
    background_color: Option<String>,
    button_color: Option<String>,
) -> Result<Company, AppError> {
    mutate(store, id, |company| {
        company.logo_path = logo_path;
        company.background_color = background_color;
        company.button_color = button_color;
    })
    .await
}

/// Delete a company and clear `company_id` on every account that pointed at
/// it. This is the only cross-collection cascade in the system; the
/// accounts themselves are kept.
pub async fn delete(store: &Store, id: u64) -> Result<(), AppError> {
    // Lock ordering: companies, then accounts.
    let _companies_guard = store.companies_lock.lock().await;
    let mut companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
    let before = companies.len();
    companies.retain(|c| c.id != id);
    if companies.len() == before {
        return Err(AppError::NotFound("Company not found".to_string()));
    }
    store.write_collection(COMPANIES_FILE, &companies).await?;

    let _accounts_guard = store.accounts_lock.lock().await;
    let mut accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    let mut changed = false;
    for account in &mut accounts {
        if account.company_id == Some(id) {
            account.company_id = None;
            changed = true;
        }
    }
    if changed {
        store.write_collection(ACCOUNTS_FILE, &accounts).await?;
    }
    Ok(())
}

pub async fn list_users_of(store: &Store, id: u64) -> Result<Vec<AccountView>, AppError> {
    // 404 for a company that does not exist, empty list for one with no
    // members.
    get(store, id).await?;
    let accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    Ok(accounts
        .iter()
        .filter(|a| a.company_id == Some(id))
        .map(AccountView::from)
        .collect())
}

/// Whether the company's subscription currently gates access open. False
/// for a missing or disabled company or one past its expiration date.
pub async fn is_subscription_active(store: &Store, id: u64) -> Result<bool, AppError> {
    let companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
    Ok(companies
        .iter()
        .find(|c| c.id == id)
        .is_some_and(|c| c.subscription_active_at(Utc::now())))
}

async fn mutate<F>(store: &Store, id: u64, apply: F) -> Result<Company, AppError>
where
    F: FnOnce(&mut Company),
{
    let _guard = store.companies_lock.lock().await;
    let mut companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
    let Some(company) = companies.iter_mut().find(|c| c.id == id) else {
        return Err(AppError::NotFound("Company not found".to_string()));
    };
    apply(company);
    let updated = company.clone();
    store.write_collection(COMPANIES_FILE, &companies).await?;
    Ok(updated)
}
