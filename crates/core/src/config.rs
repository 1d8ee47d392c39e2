//! Pipeline configuration.
//!
//! Everything the external services and the encoder need is collected
//! into one explicit [`PipelineConfig`] passed into the coordinator at
//! construction. No ambient globals: runs stay independently testable
//! and fake service clients can be injected without touching the
//! environment.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Text-generation model used by the narrative planner.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Fixed narration voice, not user-controlled.
pub const DEFAULT_VOICE: &str = "en-US-GuyNeural";
/// Image-generation service base URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";
/// Image-generation backend selector.
pub const DEFAULT_IMAGE_MODEL: &str = "flux";
/// Root directory holding the audio/, images/ and videos/ subdirs.
pub const DEFAULT_MEDIA_ROOT: &str = "static";

/// Target scene resolution, 16:9.
pub const SCENE_WIDTH: u32 = 1280;
/// Target scene resolution, 16:9.
pub const SCENE_HEIGHT: u32 = 720;
/// Output frame rate. Scenes are static images, so a low rate is a
/// bandwidth/CPU tradeoff, not a quality target.
pub const OUTPUT_FPS: u32 = 10;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Errors constructing a [`PipelineConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Configuration for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// API key for the text-generation service.
    pub text_api_key: String,
    /// Text-generation model name.
    pub text_model: String,
    /// Narration voice identifier.
    pub voice: String,
    /// Base URL of the image-generation service.
    pub image_base_url: String,
    /// Image-generation backend selector.
    pub image_model: String,
    /// Root directory for media artifacts.
    pub media_root: PathBuf,
}

impl PipelineConfig {
    /// Build a config from process environment variables.
    ///
    /// `GEMINI_API_KEY` is required; everything else falls back to the
    /// defaults above. Overrides: `REELFORGE_TEXT_MODEL`,
    /// `REELFORGE_VOICE`, `REELFORGE_IMAGE_BASE_URL`,
    /// `REELFORGE_IMAGE_MODEL`, `REELFORGE_MEDIA_ROOT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup (tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        Ok(Self {
            text_api_key,
            text_model: lookup("REELFORGE_TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            voice: lookup("REELFORGE_VOICE").unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            image_base_url: lookup("REELFORGE_IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            image_model: lookup("REELFORGE_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            media_root: PathBuf::from(
                lookup("REELFORGE_MEDIA_ROOT").unwrap_or_else(|| DEFAULT_MEDIA_ROOT.to_string()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let vars = HashMap::new();
        let err = PipelineConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn from_lookup_rejects_blank_api_key() {
        let vars = HashMap::from([("GEMINI_API_KEY", "   ")]);
        assert!(PipelineConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn from_lookup_applies_defaults() {
        let vars = HashMap::from([("GEMINI_API_KEY", "k")]);
        let config = PipelineConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.voice, DEFAULT_VOICE);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.media_root, PathBuf::from("static"));
    }

    #[test]
    fn from_lookup_honours_overrides() {
        let vars = HashMap::from([
            ("GEMINI_API_KEY", "k"),
            ("REELFORGE_VOICE", "en-GB-SoniaNeural"),
            ("REELFORGE_MEDIA_ROOT", "/tmp/media"),
        ]);
        let config = PipelineConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.voice, "en-GB-SoniaNeural");
        assert_eq!(config.media_root, PathBuf::from("/tmp/media"));
    }
}
