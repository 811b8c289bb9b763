//! Account collection operations. Every mutation is load → scan → save
//! under the accounts lock; reads go through [`AccountView`] so password
//! hashes never leave this module.

use chrono::Utc;

use crate::auth::password;
use crate::error::AppError;
use crate::models::{Account, AccountView, Company, Role, Tier};
use crate::store::{ACCOUNTS_FILE, COMPANIES_FILE, Store};

pub struct NewAccount<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub enabled: bool,
    pub email: &'a str,
    pub tier: &'a str,
    pub role: &'a str,
    pub company_id: Option<u64>,
}

/// Check a username/password pair and record the login time on success.
///
/// The username matches case-insensitively; the stored spelling is kept.
/// Failure reasons are deliberately distinct so both apps can surface them
/// verbatim.
pub async fn authenticate(
    store: &Store,
    username: &str,
    password_input: &str,
) -> Result<AccountView, AppError> {
    let username = username.trim();
    let password_input = password_input.trim();

    if username.is_empty() || password_input.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let _guard = store.accounts_lock.lock().await;
    let mut accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;

    if accounts.is_empty() {
        return Err(AppError::Unauthorized("No users exist".to_string()));
    }

    let Some(account) = accounts
        .iter_mut()
        .find(|a| a.username.eq_ignore_ascii_case(username))
    else {
        return Err(AppError::Unauthorized("User not found".to_string()));
    };

    if !account.enabled {
        return Err(AppError::Forbidden("Account is disabled".to_string()));
    }

    let valid = password::verify(password_input, &account.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    account.last_login = Some(Utc::now());
    let view = AccountView::from(&*account);
    store.write_collection(ACCOUNTS_FILE, &accounts).await?;
    Ok(view)
}

/// Create an account. Duplicate usernames are rejected with an exact-case
/// comparison; unknown tier/role names fall back to their defaults instead
/// of erroring; a given `company_id` must name an existing company.
pub async fn create(store: &Store, new: NewAccount<'_>) -> Result<AccountView, AppError> {
    let username = new.username.trim();
    if username.is_empty() || new.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    if let Some(company_id) = new.company_id {
        let companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
        if !companies.iter().any(|c| c.id == company_id) {
            return Err(AppError::NotFound(format!(
                "Company {company_id} does not exist"
            )));
        }
    }

    let password_hash = password::hash(new.password).map_err(AppError::Internal)?;

    let _guard = store.accounts_lock.lock().await;
    let mut accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;

    if accounts.iter().any(|a| a.username == username) {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let account = Account {
        username: username.to_string(),
        password_hash,
        enabled: new.enabled,
        email: new.email.trim().to_string(),
        tier: Tier::from_input(new.tier),
        role: Role::from_input(new.role),
        company_id: new.company_id,
        created_date: Utc::now(),
        last_login: None,
    };
    let view = AccountView::from(&account);

    accounts.push(account);
    store.write_collection(ACCOUNTS_FILE, &accounts).await?;
    Ok(view)
}

pub async fn get(store: &Store, username: &str) -> Result<AccountView, AppError> {
    let accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    accounts
        .iter()
        .find(|a| a.username == username)
        .map(AccountView::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn list(store: &Store) -> Result<Vec<AccountView>, AppError> {
    let accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    let mut views: Vec<AccountView> = accounts.iter().map(AccountView::from).collect();
    views.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(views)
}

pub async fn count(store: &Store) -> Result<usize, AppError> {
    let accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    Ok(accounts.len())
}

pub async fn update_tier(store: &Store, username: &str, tier: &str) -> Result<(), AppError> {
    mutate(store, username, |account| {
        account.tier = Tier::from_input(tier);
    })
    .await
}

pub async fn update_role(store: &Store, username: &str, role: &str) -> Result<(), AppError> {
    mutate(store, username, |account| {
        account.role = Role::from_input(role);
    })
    .await
}

/// Assign or clear the account's company. A non-`None` target must exist.
pub async fn update_company(
    store: &Store,
    username: &str,
    company_id: Option<u64>,
) -> Result<(), AppError> {
    if let Some(id) = company_id {
        let companies: Vec<Company> = store.read_collection(COMPANIES_FILE).await?;
        if !companies.iter().any(|c| c.id == id) {
            return Err(AppError::NotFound(format!("Company {id} does not exist")));
        }
    }
    mutate(store, username, |account| {
        account.company_id = company_id;
    })
    .await
}

pub async fn update_password(
    store: &Store,
    username: &str,
    new_password: &str,
) -> Result<(), AppError> {
    if new_password.is_empty() {
        return Err(AppError::BadRequest("Password cannot be empty".to_string()));
    }
    let password_hash = password::hash(new_password).map_err(AppError::Internal)?;
    mutate(store, username, move |account| {
        account.password_hash = password_hash;
    })
    .await
}

pub async fn set_enabled(store: &Store, username: &str, enabled: bool) -> Result<(), AppError> {
    mutate(store, username, |account| {
        account.enabled = enabled;
    })
    .await
}

pub async fn delete(store: &Store, username: &str) -> Result<(), AppError> {
    let _guard = store.accounts_lock.lock().await;
    let mut accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    let before = accounts.len();
    accounts.retain(|a| a.username != username);
    if accounts.len() == before {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    store.write_collection(ACCOUNTS_FILE, &accounts).await?;
    Ok(())
}

async fn mutate<F>(store: &Store, username: &str, apply: F) -> Result<(), AppError>
where
    F: FnOnce(&mut Account),
{
    let _guard = store.accounts_lock.lock().await;
    let mut accounts: Vec<Account> = store.read_collection(ACCOUNTS_FILE).await?;
    let Some(account) = accounts.iter_mut().find(|a| a.username == username) else {
        return Err(AppError::NotFound("User not found".to_string()));
    };
    apply(account);
    store.write_collection(ACCOUNTS_FILE, &accounts).await?;
    Ok(())
}
