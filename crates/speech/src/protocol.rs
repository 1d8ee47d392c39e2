//! Edge read-aloud WebSocket message framing.
//!
//! The service speaks a header/body text protocol: each frame carries
//! `Key:Value` header lines separated by CRLF, a blank line, then the
//! payload. Binary frames prefix the headers with a two-byte
//! big-endian header length. Audio arrives in binary frames whose
//! `Path` header is `audio`; a text frame with `Path:turn.end` closes
//! the synthesis turn.

/// Output format requested from the service.
pub const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Build the `speech.config` frame sent once after connecting.
pub fn speech_config_message() -> String {
    format!(
        "Content-Type:application/json; charset=utf-8\r\nPath:speech.config\r\n\r\n\
         {{\"context\":{{\"synthesis\":{{\"audio\":{{\"metadataoptions\":\
         {{\"sentenceBoundaryEnabled\":\"false\",\"wordBoundaryEnabled\":\"false\"}},\
         \"outputFormat\":\"{OUTPUT_FORMAT}\"}}}}}}}}"
    )
}

/// Build the SSML frame that requests synthesis of `text` with `voice`.
pub fn ssml_message(request_id: &str, voice: &str, text: &str) -> String {
    let body = format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{voice}'>{}</voice></speak>",
        escape_xml(text)
    );
    format!(
        "X-RequestId:{request_id}\r\nContent-Type:application/ssml+xml\r\nPath:ssml\r\n\r\n{body}"
    )
}

/// Escape the five XML special characters in narration text.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Extract the value of the `Path` header from a frame's header block.
pub fn header_path(headers: &str) -> Option<&str> {
    headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "Path")
        .map(|(_, value)| value.trim())
}

/// Whether a text frame ends the synthesis turn.
pub fn is_turn_end(frame: &str) -> bool {
    header_section(frame)
        .and_then(header_path)
        .is_some_and(|p| p == "turn.end")
}

/// Split a binary frame into its header block and payload.
///
/// Layout: two-byte big-endian header length, the ASCII header block,
/// then the payload. Returns `None` for frames too short to carry the
/// declared headers.
pub fn split_binary_frame(frame: &[u8]) -> Option<(&str, &[u8])> {
    if frame.len() < 2 {
        return None;
    }
    let header_len = u16::from_be_bytes([frame[0], frame[1]]) as usize;
    if frame.len() < 2 + header_len {
        return None;
    }
    let headers = std::str::from_utf8(&frame[2..2 + header_len]).ok()?;
    Some((headers, &frame[2 + header_len..]))
}

/// Whether a binary frame carries audio payload, returning the payload.
pub fn audio_payload(frame: &[u8]) -> Option<&[u8]> {
    let (headers, payload) = split_binary_frame(frame)?;
    (header_path(headers) == Some("audio")).then_some(payload)
}

/// Header block of a text frame (everything before the blank line).
fn header_section(frame: &str) -> Option<&str> {
    frame.split("\r\n\r\n").next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_frame(headers: &str, payload: &[u8]) -> Vec<u8> {
        let mut frame = (headers.len() as u16).to_be_bytes().to_vec();
        frame.extend_from_slice(headers.as_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn speech_config_pins_output_format() {
        let msg = speech_config_message();
        assert!(msg.contains("Path:speech.config"));
        assert!(msg.contains(OUTPUT_FORMAT));
    }

    #[test]
    fn ssml_message_carries_request_id_and_voice() {
        let msg = ssml_message("req-1", "en-US-GuyNeural", "Hello there.");
        assert!(msg.starts_with("X-RequestId:req-1\r\n"));
        assert!(msg.contains("<voice name='en-US-GuyNeural'>Hello there.</voice>"));
        assert!(msg.contains("Path:ssml"));
    }

    #[test]
    fn ssml_message_escapes_markup_in_text() {
        let msg = ssml_message("r", "v", "Tom & Jerry <3");
        assert!(msg.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn header_path_finds_path_header() {
        let headers = "X-RequestId:abc\r\nContent-Type:audio/mpeg\r\nPath:audio";
        assert_eq!(header_path(headers), Some("audio"));
    }

    #[test]
    fn header_path_missing_returns_none() {
        assert_eq!(header_path("Content-Type:audio/mpeg"), None);
    }

    #[test]
    fn is_turn_end_matches_only_turn_end() {
        assert!(is_turn_end("X-RequestId:a\r\nPath:turn.end\r\n\r\n{}"));
        assert!(!is_turn_end("X-RequestId:a\r\nPath:turn.start\r\n\r\n{}"));
    }

    #[test]
    fn split_binary_frame_separates_headers_and_payload() {
        let frame = binary_frame("Path:audio", b"mp3bytes");
        let (headers, payload) = split_binary_frame(&frame).unwrap();
        assert_eq!(headers, "Path:audio");
        assert_eq!(payload, b"mp3bytes");
    }

    #[test]
    fn split_binary_frame_rejects_truncated_frames() {
        assert!(split_binary_frame(&[0x00]).is_none());
        // Declared header length longer than the frame.
        assert!(split_binary_frame(&[0x00, 0x20, b'P']).is_none());
    }

    #[test]
    fn audio_payload_requires_audio_path() {
        let audio = binary_frame("Path:audio", b"abc");
        assert_eq!(audio_payload(&audio), Some(&b"abc"[..]));

        let metadata = binary_frame("Path:audio.metadata", b"{}");
        assert_eq!(audio_payload(&metadata), None);
    }
}
