//! Keyword dictionaries for the heuristic breakdown.
//!
//! The built-in lexicon can be replaced per workspace by a `lexicon.json`
//! file with the same shape.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving a lexicon file.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to access lexicon {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid lexicon {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Word stems and hints used by the heuristic analyzer.
///
/// Stems are matched at the start of a word in lowercased text, so
/// `машин` matches `машина` and `машину`. Hints are plain substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub crowd: Vec<String>,
    pub props: Vec<String>,
    pub effects: Vec<String>,
    pub costume_hints: Vec<String>,
    pub makeup_hints: Vec<String>,
    /// Capitalized words that are never character names (uppercase form).
    pub name_exclusions: Vec<String>,
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            crowd: words(&["толпа", "прохож", "пешеход", "люд", "массовка", "музыкант"]),
            props: words(&[
                "автомобиль",
                "машин",
                "папк",
                "телефон",
                "чашк",
                "книга",
                "саксофон",
                "чемодан",
            ]),
            effects: words(&["ветер", "дожд", "снег", "дым", "огонь", "пыль", "листь"]),
            costume_hints: words(&["повседневн", "делов", "форм", "военн", "нарядн", "рабоч"]),
            makeup_hints: words(&["гр", "макияж", "грима", "кровь", "пыль", "пот"]),
            name_exclusions: words(&["СЦЕНА", "ИНТ", "ЭКСТ", "ДЕНЬ", "НОЧЬ", "УТРО", "ВЕЧЕР"]),
        }
    }
}

impl Lexicon {
    /// Load a lexicon from a JSON file. Missing keys take built-in values.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| LexiconError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load the lexicon at `path` if present, otherwise the built-in one.
    pub fn load_or_default(path: &Path) -> Result<Self, LexiconError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the lexicon as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| LexiconError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        fs::write(&path, r#"{"props": ["гитар"]}"#).unwrap();

        let lexicon = Lexicon::load(&path).unwrap();
        assert_eq!(lexicon.props, vec!["гитар".to_string()]);
        assert_eq!(lexicon.crowd, Lexicon::default().crowd);
    }

    #[test]
    fn missing_file_gives_builtin_lexicon() {
        let dir = tempdir().unwrap();
        let lexicon = Lexicon::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(lexicon, Lexicon::default());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Lexicon::load(&path), Err(LexiconError::Parse { .. })));
    }

    #[test]
    fn save_then_load_preserves_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        let mut lexicon = Lexicon::default();
        lexicon.effects.push("туман".to_string());

        lexicon.save(&path).unwrap();
        assert_eq!(Lexicon::load(&path).unwrap(), lexicon);
    }
}
