//! Run outcome and the structured report for the invoking collaborator.

use serde::Serialize;

use reelforge_core::types::{RunId, VideoArtifact};

use crate::error::PipelineError;

/// Successful result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Identifier the run's artifacts were namespaced under.
    pub run: RunId,
    /// The final video file; the only artifact that outlives the run.
    pub video: VideoArtifact,
    /// The narration script, returned alongside the video.
    pub script: String,
}

/// Report handed back to the invoking collaborator — success with a
/// video URL and script, or failure with an error message, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunReport {
    Success {
        success: bool,
        video_url: String,
        script: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl RunReport {
    /// Convert a run result into the wire report.
    pub fn from_result(result: Result<RunOutcome, PipelineError>) -> Self {
        match result {
            Ok(outcome) => Self::Success {
                success: true,
                video_url: outcome.video.path.to_string_lossy().to_string(),
                script: outcome.script,
            },
            Err(e) => Self::Failure {
                success: false,
                error: e.to_string(),
            },
        }
    }
}
