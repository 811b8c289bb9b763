pub mod client;
pub mod prompt;

use serde::Deserialize;

/// A structured post request as submitted by the user form. Free-text
/// fields are sanitized by the generation client before any prompt is
/// built; the enum-like fields are plain strings with fixed fallbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub purpose: String,
    pub audience: String,
    pub message: String,
    pub tone_intensity: String,
    pub language_style: String,
    pub post_length: String,
    pub formatting: String,
    #[serde(default)]
    pub cta: String,
    pub post_goal: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_visual_style")]
    pub visual_style: String,
}

fn default_template() -> String {
    "professional".to_string()
}

fn default_visual_style() -> String {
    "photo_realistic".to_string()
}
