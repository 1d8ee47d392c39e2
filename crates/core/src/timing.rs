//! Per-scene timing math for the video assembler.
//!
//! The narration's duration is split evenly across scenes; adjacent
//! clips then overlap by the crossfade window, so the total visual
//! length shrinks slightly below the audio length when there is more
//! than one scene. That approximation is deliberate and is not
//! corrected here.

use crate::error::CoreError;

/// Crossfade window applied at each clip's leading edge, in seconds.
pub const CROSSFADE_SECS: f64 = 0.5;

/// Compute the per-scene display duration: `audio_duration / scene_count`.
///
/// Uniform split, no alignment to speech pauses. Rejects non-positive
/// durations and zero scenes, which would otherwise produce clips of
/// zero or undefined length.
pub fn per_scene_duration(audio_duration_secs: f64, scene_count: usize) -> Result<f64, CoreError> {
    if scene_count == 0 {
        return Err(CoreError::Validation(
            "Cannot split audio across zero scenes".to_string(),
        ));
    }
    if !audio_duration_secs.is_finite() || audio_duration_secs <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Audio duration must be positive, got {audio_duration_secs}"
        )));
    }
    Ok(audio_duration_secs / scene_count as f64)
}

/// Total visual duration after crossfade overlap: `N*per - 0.5*(N-1)`.
///
/// For a single scene there is no crossfade and the visual length
/// equals the per-scene duration.
pub fn total_visual_duration(per_scene_secs: f64, scene_count: usize) -> f64 {
    if scene_count == 0 {
        return 0.0;
    }
    per_scene_secs * scene_count as f64 - CROSSFADE_SECS * (scene_count as f64 - 1.0)
}
