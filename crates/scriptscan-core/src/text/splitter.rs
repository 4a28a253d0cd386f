//! Scene splitting.
//!
//! Scene headings are numbered lines such as:
//!
//! ```text
//! 21. НАТ. горы. ЛАГЕРЬ. ВЕЧЕР.
//! 24. ФЛЕШБЕК кати-4. ...
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize;
use crate::domain::{FALLBACK_SCENE_HEADER, Scene};

/// One to three digits and a dot at the start of the text or of a line.
/// `\s*` may cross a line break, so `12.\nINT` still counts as a heading.
static SCENE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\n)(\d{1,3}\.\s*[^\n]+)").expect("scene header pattern is valid")
});

/// Split script text into scenes.
///
/// Text without any numbered heading becomes a single scene titled
/// [`FALLBACK_SCENE_HEADER`].
pub fn split_scenes(text: &str) -> Vec<Scene> {
    let mut text = normalize(text);
    text.push('\n');

    let headers: Vec<_> = SCENE_HEADER
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .collect();

    if headers.is_empty() {
        return vec![Scene::new(FALLBACK_SCENE_HEADER, text.trim())];
    }

    headers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = headers.get(i + 1).map_or(text.len(), |next| next.start());
            let header = m.as_str().trim();
            let body = text[m.start()..end].replacen(header, "", 1);
            Scene::new(header, body.trim())
        })
        .collect()
}
