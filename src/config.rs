use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub registration: RegistrationMode,
    pub log_level: String,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Whether self-serve registration is open beyond the bootstrap account.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationMode {
    Open,
    Closed,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env_required("JWT_SECRET")?;
        let api_key = env_required("OPENAI_API_KEY")?;

        let data_dir = PathBuf::from(env_or("POSTWRIGHT_DATA_DIR", "data"));

        let host: IpAddr = env_or("POSTWRIGHT_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid POSTWRIGHT_HOST: {e}"))?;

        let port: u16 = env_or("POSTWRIGHT_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid POSTWRIGHT_PORT: {e}"))?;

        let registration = match env_or("POSTWRIGHT_REGISTRATION", "open").as_str() {
            "closed" => RegistrationMode::Closed,
            _ => RegistrationMode::Open,
        };

        let log_level = env_or("POSTWRIGHT_LOG_LEVEL", "info");

        let openai = OpenAiConfig {
            api_key,
            model: env_or("POSTWRIGHT_OPENAI_MODEL", "gpt-4"),
            base_url: env_or("POSTWRIGHT_OPENAI_BASE_URL", "https://api.openai.com"),
        };

        Ok(Config {
            data_dir,
            jwt_secret,
            host,
            port,
            registration,
            log_level,
            openai,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
