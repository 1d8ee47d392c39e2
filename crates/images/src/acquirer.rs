//! Acquirer seam trait, the sequential acquisition loop, and errors.

use reelforge_core::storage::MediaDirs;
use reelforge_core::types::{RunId, SceneImage};

use crate::client::PollinationsClient;
use crate::seed::SeedSource;

/// Errors from the scene image acquisition stage.
///
/// A failure on any single prompt is fatal to the whole run: a video
/// assembled from fewer images than prompts would silently shift
/// timing, so the stage aborts instead.
#[derive(Debug, thiserror::Error)]
pub enum ImageAcquisitionError {
    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("Image fetch failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Image service error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The reply bytes are not any known image format.
    #[error("Image service returned non-image data ({bytes} bytes)")]
    NotAnImage { bytes: usize },

    /// The configured base URL cannot address the service.
    #[error("Invalid image service URL: {0}")]
    InvalidUrl(String),

    /// Persisting the image file failed.
    #[error("Image file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage seam: anything that can produce one image per prompt.
#[async_trait::async_trait]
pub trait SceneImageAcquirer: Send + Sync {
    /// Fetch one image per prompt, index-aligned with the input, and
    /// persist each to the run's per-index path under `dirs`.
    ///
    /// Every returned set has exactly `prompts.len()` entries; partial
    /// results are never returned.
    async fn acquire(
        &self,
        run: &RunId,
        prompts: &[String],
        dirs: &MediaDirs,
    ) -> Result<Vec<SceneImage>, ImageAcquisitionError>;
}

/// Real acquirer: sequential fetches from the Pollinations endpoint,
/// one prompt at a time, in prompt order.
pub struct PollinationsAcquirer {
    client: PollinationsClient,
    seeds: Box<dyn SeedSource>,
}

impl PollinationsAcquirer {
    pub fn new(client: PollinationsClient, seeds: Box<dyn SeedSource>) -> Self {
        Self { client, seeds }
    }
}

#[async_trait::async_trait]
impl SceneImageAcquirer for PollinationsAcquirer {
    async fn acquire(
        &self,
        run: &RunId,
        prompts: &[String],
        dirs: &MediaDirs,
    ) -> Result<Vec<SceneImage>, ImageAcquisitionError> {
        let mut scenes = Vec::with_capacity(prompts.len());

        for (index, prompt) in prompts.iter().enumerate() {
            let seed = self.seeds.next_seed();
            tracing::info!(run = %run, index, seed, "Fetching scene image");

            let bytes = self.client.fetch(prompt, seed).await?;

            let path = dirs.image_path(run, index);
            tokio::fs::write(&path, &bytes).await?;

            scenes.push(SceneImage { index, path });
        }

        Ok(scenes)
    }
}
