//! ffmpeg argument and filter-graph construction.
//!
//! Pure string building, separated from process execution so the
//! graph shape is testable without running ffmpeg.
//!
//! Each image input is looped for the per-scene duration, scaled and
//! padded to the target frame, and pinned to the output frame rate.
//! Adjacent clips are joined with `xfade`, whose offsets are placed so
//! the crossfade consumes overlap instead of extending total length:
//! the joined stream runs `N*per - 0.5*(N-1)` seconds, slightly short
//! of the audio when N > 1. That mismatch is an accepted
//! approximation; the soundtrack is attached untrimmed.

use std::path::Path;

use reelforge_core::config::{OUTPUT_FPS, SCENE_HEIGHT, SCENE_WIDTH};
use reelforge_core::timing::CROSSFADE_SECS;

/// Build the filter graph for `scene_count` scenes of `per_scene`
/// seconds each. Returns the graph and the label of its final video
/// stream.
pub fn build_filter_graph(scene_count: usize, per_scene: f64) -> (String, String) {
    let mut graph = String::new();

    // Normalize every input to the target frame before any fading.
    for i in 0..scene_count {
        graph.push_str(&format!(
            "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1,fps={fps}[v{i}];",
            w = SCENE_WIDTH,
            h = SCENE_HEIGHT,
            fps = OUTPUT_FPS,
        ));
    }

    if scene_count == 1 {
        // Single scene: nothing to fade into.
        graph.pop();
        return (graph, "[v0]".to_string());
    }

    // Chain the crossfades. Joining clip j+1 at offset
    // (j+1)*(per - 0.5) makes each fade overlap the previous clip's
    // tail rather than extend it.
    let mut upstream = "[v0]".to_string();
    for j in 0..scene_count - 1 {
        let offset = (j + 1) as f64 * (per_scene - CROSSFADE_SECS);
        let out = format!("[x{}]", j + 1);
        graph.push_str(&format!(
            "{upstream}[v{next}]xfade=transition=fade:duration={CROSSFADE_SECS}:offset={offset:.3}{out};",
            next = j + 1,
        ));
        upstream = out;
    }
    graph.pop();

    (graph, upstream)
}

/// Build the full ffmpeg argument list.
///
/// `images` are the scene files in index order, `audio` becomes input
/// `N` and is mapped untrimmed as the soundtrack.
pub fn build_encode_args(
    images: &[impl AsRef<Path>],
    audio: &Path,
    per_scene: f64,
    output: &Path,
) -> Vec<String> {
    let mut args = vec!["-y".to_string()];

    for image in images {
        args.extend([
            "-loop".to_string(),
            "1".to_string(),
            "-t".to_string(),
            format!("{per_scene:.6}"),
            "-i".to_string(),
            image.as_ref().to_string_lossy().to_string(),
        ]);
    }
    args.extend(["-i".to_string(), audio.to_string_lossy().to_string()]);

    let (graph, out_label) = build_filter_graph(images.len(), per_scene);
    args.extend(["-filter_complex".to_string(), graph]);
    args.extend(["-map".to_string(), out_label]);
    args.extend(["-map".to_string(), format!("{}:a", images.len())]);

    args.extend([
        "-r".to_string(),
        OUTPUT_FPS.to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
    ]);
    args.push(output.to_string_lossy().to_string());

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn single_scene_graph_has_no_crossfade() {
        let (graph, label) = build_filter_graph(1, 6.0);
        assert!(!graph.contains("xfade"));
        assert_eq!(label, "[v0]");
        assert!(graph.contains("scale=1280:720"));
        assert!(graph.contains("fps=10"));
    }

    #[test]
    fn three_scene_graph_chains_two_crossfades() {
        let (graph, label) = build_filter_graph(3, 4.0);
        assert_eq!(graph.matches("xfade").count(), 2);
        assert_eq!(label, "[x2]");
        // Offsets consume the overlap: (j+1)*(4.0 - 0.5).
        assert!(graph.contains("offset=3.500"));
        assert!(graph.contains("offset=7.000"));
        assert!(graph.contains("duration=0.5"));
    }

    #[test]
    fn graph_normalizes_every_input() {
        let (graph, _) = build_filter_graph(3, 4.0);
        for i in 0..3 {
            assert!(graph.contains(&format!("[{i}:v]scale=")));
        }
        assert!(graph.contains("pad=1280:720"));
    }

    #[test]
    fn encode_args_loop_each_image_for_per_scene_duration() {
        let images = vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")];
        let args = build_encode_args(&images, Path::new("n.mp3"), 4.75, Path::new("out.mp4"));

        assert_eq!(args.iter().filter(|a| *a == "-loop").count(), 2);
        assert_eq!(args.iter().filter(|a| *a == "4.750000").count(), 2);
        assert!(args.contains(&"a.jpg".to_string()));
        assert!(args.contains(&"b.jpg".to_string()));
        assert!(args.contains(&"n.mp3".to_string()));
    }

    #[test]
    fn encode_args_map_audio_as_last_input() {
        let images = vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg"), PathBuf::from("c.jpg")];
        let args = build_encode_args(&images, Path::new("n.mp3"), 3.0, Path::new("out.mp4"));

        let map_positions: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-map")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(map_positions.len(), 2);
        assert_eq!(args[map_positions[0] + 1], "[x2]");
        assert_eq!(args[map_positions[1] + 1], "3:a");
    }

    #[test]
    fn encode_args_pin_codecs_and_frame_rate() {
        let images = vec![PathBuf::from("a.jpg")];
        let args = build_encode_args(&images, Path::new("n.mp3"), 5.0, Path::new("out.mp4"));

        let pair = |flag: &str| {
            let idx = args.iter().position(|a| a == flag).unwrap();
            args[idx + 1].clone()
        };
        assert_eq!(pair("-c:v"), "libx264");
        assert_eq!(pair("-c:a"), "aac");
        assert_eq!(pair("-r"), "10");
        assert_eq!(pair("-pix_fmt"), "yuv420p");
        assert_eq!(args.last().unwrap(), "out.mp4");
        assert_eq!(args[0], "-y");
    }
}
