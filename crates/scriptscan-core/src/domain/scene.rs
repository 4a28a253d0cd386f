use serde::{Deserialize, Serialize};

/// Header used when a script contains no numbered scene headings.
pub const FALLBACK_SCENE_HEADER: &str = "СЦЕНА 1";

/// A single scene cut out of a screenplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// The heading line, e.g. `21. НАТ. горы. ЛАГЕРЬ. ВЕЧЕР.`
    pub header: String,
    /// Scene text with the heading removed.
    pub body: String,
}

impl Scene {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }
}
