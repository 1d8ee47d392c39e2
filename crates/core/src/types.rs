//! Core data model for a single pipeline run.
//!
//! A [`RunId`] namespaces every artifact a run creates. The stage
//! outputs ([`StoryPlan`], [`AudioTrack`], [`SceneImage`],
//! [`VideoArtifact`]) flow strictly forward between stages; no stage
//! reads another's internal state.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Run identifier
// ---------------------------------------------------------------------------

/// Short unique token identifying one pipeline run.
///
/// Eight hex characters taken from a UUID v4. Every transient artifact
/// path (audio, per-scene images) and the final video filename embed
/// this token, so concurrent runs never collide on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh run identifier.
    pub fn generate() -> Self {
        let full = uuid::Uuid::new_v4().simple().to_string();
        Self(full[..8].to_string())
    }

    /// Build a run ID from a known token (tests, replay).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Stage outputs
// ---------------------------------------------------------------------------

/// Output of the narrative planning stage.
///
/// `image_prompts` is ordered and 1:1 with the sentences of `script`;
/// downstream timing assumes this alignment, so the planner validates
/// it before the plan leaves the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryPlan {
    /// Narration text, target length around three sentences.
    pub script: String,
    /// One visual-description prompt per narrated sentence, in order.
    pub image_prompts: Vec<String>,
}

impl StoryPlan {
    /// Number of scenes this plan describes.
    pub fn scene_count(&self) -> usize {
        self.image_prompts.len()
    }
}

/// A synthesized narration track: encoded audio file plus its decoded
/// duration, read back from the file after synthesis.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub path: PathBuf,
    /// Duration in seconds, always > 0 for a valid track.
    pub duration_secs: f64,
}

/// One still image for one scene, tagged with its 0-based scene index
/// (matching prompt order).
#[derive(Debug, Clone)]
pub struct SceneImage {
    pub index: usize,
    pub path: PathBuf,
}

/// The final encoded video file. Self-contained: it references no
/// other run artifact and outlives the run's transient cleanup.
#[derive(Debug, Clone)]
pub struct VideoArtifact {
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Sentence counting
// ---------------------------------------------------------------------------

/// Count sentences in a narration script.
///
/// A sentence ends at a run of terminator characters (`.`, `!`, `?`),
/// so `"Wait?!"` and `"And then..."` each count once. Trailing text
/// without a terminator counts as a final sentence. Decimal points
/// inside numbers are miscounted as boundaries; the planner is
/// instructed to produce plain prose, so this loose contract matches
/// what the directing prompt asks for.
pub fn count_sentences(script: &str) -> usize {
    let mut count = 0;
    let mut in_terminator = false;
    let mut seen_content = false;

    for ch in script.chars() {
        if matches!(ch, '.' | '!' | '?') {
            if !in_terminator && seen_content {
                count += 1;
            }
            in_terminator = true;
            seen_content = false;
        } else {
            in_terminator = false;
            if !ch.is_whitespace() {
                seen_content = true;
            }
        }
    }

    if seen_content {
        count += 1;
    }
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
