//! WebSocket client for the Edge read-aloud synthesis service.
//!
//! One [`EdgeSpeechClient::synthesize`] call opens a connection, sends
//! the config and SSML frames, collects binary audio frames until the
//! turn ends, and writes the result to the run's audio path.

use std::path::Path;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use reelforge_core::ffmpeg::probe_duration;
use reelforge_core::types::AudioTrack;

use crate::protocol::{audio_payload, is_turn_end, speech_config_message, ssml_message};
use crate::synthesizer::{SpeechSynthesizer, SynthesisError};

const WSS_URL: &str =
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1";
const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";

/// Client for the Edge synthesis WebSocket endpoint.
///
/// Holds the fixed narration voice; the connection itself is
/// per-synthesis and torn down when the turn completes.
pub struct EdgeSpeechClient {
    voice: String,
}

impl EdgeSpeechClient {
    /// Create a client with a fixed voice identifier.
    pub fn new(voice: String) -> Self {
        Self { voice }
    }

    /// Open a connection, run one synthesis turn, and return the raw
    /// MP3 bytes.
    async fn run_turn(&self, script: &str) -> Result<Vec<u8>, SynthesisError> {
        let connection_id = uuid::Uuid::new_v4().simple().to_string();
        let url = format!(
            "{WSS_URL}?TrustedClientToken={TRUSTED_CLIENT_TOKEN}&ConnectionId={connection_id}"
        );

        let (mut ws_stream, _response) = connect_async(&url).await?;

        ws_stream
            .send(Message::Text(speech_config_message().into()))
            .await?;

        let request_id = uuid::Uuid::new_v4().simple().to_string();
        ws_stream
            .send(Message::Text(
                ssml_message(&request_id, &self.voice, script).into(),
            ))
            .await?;

        let mut audio = Vec::new();
        while let Some(frame) = ws_stream.next().await {
            match frame? {
                Message::Binary(data) => {
                    if let Some(payload) = audio_payload(&data) {
                        audio.extend_from_slice(payload);
                    }
                }
                Message::Text(text) => {
                    // turn.start and audio.metadata frames are
                    // informational and skipped.
                    if is_turn_end(&text) {
                        break;
                    }
                }
                Message::Close(frame) => {
                    tracing::debug!(?frame, "Speech service closed the connection");
                    break;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }

        let _ = ws_stream.close(None).await;

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        Ok(audio)
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for EdgeSpeechClient {
    async fn synthesize(
        &self,
        script: &str,
        output_path: &Path,
    ) -> Result<AudioTrack, SynthesisError> {
        let audio = self.run_turn(script).await?;
        tokio::fs::write(output_path, &audio).await?;

        let duration_secs = probe_duration(output_path).await?;

        tracing::info!(
            voice = %self.voice,
            bytes = audio.len(),
            duration_secs,
            path = %output_path.display(),
            "Narration synthesized"
        );

        Ok(AudioTrack {
            path: output_path.to_path_buf(),
            duration_secs,
        })
    }
}
