use serde::{Deserialize, Serialize};

pub const DEFAULT_CUSTOMER_NAME: &str = "LinkedIn Post Generator";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#E9F7EF";
pub const DEFAULT_BUTTON_COLOR: &str = "#17A2B8";

/// Customer branding singleton. Serde defaults mean a partial stored object
/// always deserializes to a fully-populated value, and saving always writes
/// the complete object back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default = "default_customer_name")]
    pub customer_name: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_button_color")]
    pub button_color: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            customer_name: default_customer_name(),
            background_color: default_background_color(),
            button_color: default_button_color(),
            logo_path: None,
        }
    }
}

fn default_customer_name() -> String {
    DEFAULT_CUSTOMER_NAME.to_string()
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_button_color() -> String {
    DEFAULT_BUTTON_COLOR.to_string()
}
