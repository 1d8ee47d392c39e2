//! FFmpeg/FFprobe shared command utilities.
//!
//! The synthesis stage probes narration files for their decoded
//! duration and the assembly stage drives the actual encode; both go
//! through the helpers here so process handling and error mapping
//! live in one place.

use std::ffi::OsStr;
use std::path::Path;

use serde::Deserialize;

/// Error type for FFmpeg/FFprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe/ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("media file not found: {0}")]
    MediaNotFound(String),

    #[error("media file has no decodable duration: {0}")]
    NoDuration(String),
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    pub format: FfprobeFormat,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    pub duration: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run `ffprobe` on a media file and return the parsed JSON output.
pub async fn probe_media(path: &Path) -> Result<FfprobeOutput, FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::MediaNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<FfprobeOutput>(&stdout)
        .map_err(|e| FfmpegError::ParseError(format!("{e}: {stdout}")))
}

/// Probe a media file and return its duration in seconds.
///
/// Fails with [`FfmpegError::NoDuration`] when neither the container
/// nor any stream reports a positive duration.
pub async fn probe_duration(path: &Path) -> Result<f64, FfmpegError> {
    let probe = probe_media(path).await?;
    let duration = parse_duration(&probe);
    if duration > 0.0 {
        Ok(duration)
    } else {
        Err(FfmpegError::NoDuration(path.to_string_lossy().to_string()))
    }
}

/// Run `ffmpeg` with the given arguments, mapping a non-zero exit to
/// [`FfmpegError::ExecutionFailed`] with the captured stderr.
pub async fn run_ffmpeg<I, S>(args: I) -> Result<(), FfmpegError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = tokio::process::Command::new("ffmpeg")
        .args(args)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse the media duration in seconds from ffprobe output.
///
/// Format-level duration takes precedence; falls back to the first
/// stream that reports one. Returns 0.0 when nothing parses.
pub fn parse_duration(probe: &FfprobeOutput) -> f64 {
    if let Some(d) = &probe.format.duration {
        if let Ok(secs) = d.parse::<f64>() {
            return secs;
        }
    }
    for stream in &probe.streams {
        if let Some(d) = &stream.duration {
            if let Ok(secs) = d.parse::<f64>() {
                return secs;
            }
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_prefers_format_level() {
        let probe: FfprobeOutput = serde_json::from_str(
            r#"{"streams":[{"codec_type":"audio","duration":"9.00"}],"format":{"duration":"9.48"}}"#,
        )
        .unwrap();
        assert_eq!(parse_duration(&probe), 9.48);
    }

    #[test]
    fn parse_duration_falls_back_to_stream() {
        let probe: FfprobeOutput = serde_json::from_str(
            r#"{"streams":[{"codec_type":"audio","duration":"7.25"}],"format":{}}"#,
        )
        .unwrap();
        assert_eq!(parse_duration(&probe), 7.25);
    }

    #[test]
    fn parse_duration_defaults_to_zero() {
        let probe: FfprobeOutput =
            serde_json::from_str(r#"{"streams":[],"format":{}}"#).unwrap();
        assert_eq!(parse_duration(&probe), 0.0);
    }

    #[test]
    fn parse_duration_ignores_unparseable_values() {
        let probe: FfprobeOutput = serde_json::from_str(
            r#"{"streams":[{"codec_type":"audio","duration":"3.5"}],"format":{"duration":"N/A"}}"#,
        )
        .unwrap();
        assert_eq!(parse_duration(&probe), 3.5);
    }

    #[tokio::test]
    async fn probe_media_missing_file_errors() {
        let err = probe_media(Path::new("/nonexistent/audio.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, FfmpegError::MediaNotFound(_)));
    }
}
