// src/extract/transcripts.rs
// =============================================================================
// Finds subtitle tracks that belong to embedded videos.
//
// For each <video>, the transcript is the first <track kind="subtitles">
// that comes after the video's opening tag in document order. That is
// usually a child of the video, but a track placed after it also counts.
// We only collect the track's src reference, not the subtitle text.
// =============================================================================

use scraper::{Html, Selector};

// Returns the src of the subtitle track for each video, in video order
//
// Example:
//   <video><track kind="subtitles" src="cap.vtt"></video>  ->  ["cap.vtt"]
pub fn extract_transcripts(document: &Html) -> Vec<String> {
    let selector = Selector::parse(r#"video, track[kind="subtitles"]"#)
        .expect("transcript selector is valid");

    let mut transcripts = Vec::new();
    // Videos seen since the last subtitle track
    let mut pending_videos = 0;

    for element in document.select(&selector) {
        if element.value().name() == "video" {
            pending_videos += 1;
            continue;
        }

        // This track is "the next track" for every pending video
        if pending_videos == 0 {
            continue;
        }
        if let Some(src) = element.value().attr("src").map(str::trim) {
            if !src.is_empty() {
                for _ in 0..pending_videos {
                    transcripts.push(src.to_string());
                }
            }
        }
        pending_videos = 0;
    }

    transcripts
}
