use std::sync::Arc;

use crate::config::Config;
use crate::r#gen::client::CompletionBackend;
use crate::rate_limit::LoginRateLimiter;
use crate::store::Store;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub completion: Arc<dyn CompletionBackend>,
    pub login_limiter: LoginRateLimiter,
}
