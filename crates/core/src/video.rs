//! Playable-video link helpers.
//!
//! Scenes carry a free-form `video_url`. When it points at YouTube the
//! views show an embedded player instead of the still image.

use std::sync::LazyLock;

use regex::Regex;

/// Recognized YouTube link shapes; capture group 2 is the video id.
const YOUTUBE_PATTERN: &str = r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*";

/// YouTube video ids are always this long.
const YOUTUBE_ID_LEN: usize = 11;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

static YOUTUBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(YOUTUBE_PATTERN).expect("valid regex"));

/// Extract the 11-character YouTube video id from a link.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let caps = YOUTUBE_RE.captures(url)?;
    let id = caps.get(2)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then_some(id)
}

/// Convert a YouTube watch/share link into its embeddable form.
///
/// Returns `None` for empty input, non-YouTube links, and links whose id is
/// not exactly 11 characters.
///
/// ```
/// use scenevault_core::video::embed_url;
///
/// assert_eq!(
///     embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("https://www.youtube.com/embed/dQw4w9WgXcQ"),
/// );
/// assert_eq!(embed_url("https://vimeo.com/12345"), None);
/// ```
pub fn embed_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    youtube_video_id(url).map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
}
