//! HTTP client for the Pollinations image-generation endpoint.
//!
//! The service is addressed as `GET {base}/prompt/{escaped prompt}`
//! with width, height, seed, and model query parameters, and replies
//! with raw image bytes. Replies are sniffed for a real image format
//! so an HTML error page never ends up on disk as a scene.

use reelforge_core::config::{SCENE_HEIGHT, SCENE_WIDTH};

use crate::acquirer::ImageAcquisitionError;

/// Fixed quality/style descriptors appended to every prompt.
///
/// The planner is instructed to keep prompts literal; this suffix
/// supplies the aesthetic. Keep content and style separated.
pub const STYLE_SUFFIX: &str =
    "photorealistic, 8k, highly detailed, cinematic lighting, shot on 35mm lens";

/// Append the style suffix to a literal scene prompt.
pub fn enhance_prompt(prompt: &str) -> String {
    format!("{prompt}, {STYLE_SUFFIX}")
}

/// HTTP client for one image-generation backend.
pub struct PollinationsClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl PollinationsClient {
    /// Create a client for the given base URL and backend selector.
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
        }
    }

    /// Build the request URL for a prompt and seed.
    ///
    /// The enhanced prompt travels as a percent-escaped path segment;
    /// resolution, seed, and model ride as query parameters.
    pub fn image_url(&self, prompt: &str, seed: u64) -> Result<url::Url, ImageAcquisitionError> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| ImageAcquisitionError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ImageAcquisitionError::InvalidUrl(self.base_url.clone()))?
            .push("prompt")
            .push(&enhance_prompt(prompt));
        url.query_pairs_mut()
            .append_pair("width", &SCENE_WIDTH.to_string())
            .append_pair("height", &SCENE_HEIGHT.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("model", &self.model);
        Ok(url)
    }

    /// Fetch one image for a prompt, synchronously from the caller's
    /// perspective, and return its bytes.
    pub async fn fetch(&self, prompt: &str, seed: u64) -> Result<Vec<u8>, ImageAcquisitionError> {
        let url = self.image_url(prompt, seed)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageAcquisitionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?.to_vec();
        if image::guess_format(&bytes).is_err() {
            return Err(ImageAcquisitionError::NotAnImage {
                bytes: bytes.len(),
            });
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PollinationsClient {
        PollinationsClient::new("https://image.pollinations.ai".to_string(), "flux".to_string())
    }

    #[test]
    fn enhance_prompt_appends_style_suffix() {
        let enhanced = enhance_prompt("a robot holding a brush");
        assert!(enhanced.starts_with("a robot holding a brush, "));
        assert!(enhanced.ends_with(STYLE_SUFFIX));
    }

    #[test]
    fn image_url_escapes_prompt_and_sets_parameters() {
        let url = client().image_url("a red fox", 42).unwrap();
        assert!(url.path().starts_with("/prompt/a%20red%20fox"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("width".to_string(), "1280".to_string())));
        assert!(query.contains(&("height".to_string(), "720".to_string())));
        assert!(query.contains(&("seed".to_string(), "42".to_string())));
        assert!(query.contains(&("model".to_string(), "flux".to_string())));
    }

    #[test]
    fn image_url_escapes_reserved_characters() {
        let url = client().image_url("50% off? yes/no", 1).unwrap();
        // The prompt must stay a single path segment.
        assert_eq!(url.path_segments().unwrap().count(), 2);
        assert!(!url.path().contains(' '));
    }
}
