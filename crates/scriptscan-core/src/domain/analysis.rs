//! Production breakdown types.
//!
//! The serialized field names are the Russian category names consumed by
//! existing clients, so they are fixed by `serde(rename)` rather than
//! derived from the Rust identifiers.

use serde::{Deserialize, Serialize};

/// Makeup requirement for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MakeupKind {
    #[default]
    #[serde(rename = "стандартный")]
    Standard,
    #[serde(rename = "особый")]
    Special,
}

/// Costume requirement for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CostumeKind {
    #[default]
    #[serde(rename = "повседневные")]
    Everyday,
    #[serde(rename = "специфические")]
    Specific,
}

impl MakeupKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "стандартный",
            Self::Special => "особый",
        }
    }
}

impl CostumeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Everyday => "повседневные",
            Self::Specific => "специфические",
        }
    }
}

/// Breakdown of a single scene.
///
/// Field order matches the order clients render the categories in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneAnalysis {
    #[serde(rename = "Персонажи")]
    pub characters: Vec<String>,
    #[serde(rename = "Массовка")]
    pub crowd: Vec<String>,
    #[serde(rename = "Реквизит")]
    pub props: Vec<String>,
    #[serde(rename = "Грим")]
    pub makeup: MakeupKind,
    #[serde(rename = "Костюмы")]
    pub costumes: CostumeKind,
    #[serde(rename = "Эффекты")]
    pub effects: Vec<String>,
}

impl SceneAnalysis {
    /// Categories as `(label, rendered value)` pairs, for console output.
    ///
    /// Empty lists render as `-`.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        fn list(items: &[String]) -> String {
            if items.is_empty() {
                "-".to_string()
            } else {
                items.join(", ")
            }
        }

        vec![
            ("Персонажи", list(&self.characters)),
            ("Массовка", list(&self.crowd)),
            ("Реквизит", list(&self.props)),
            ("Грим", self.makeup.as_str().to_string()),
            ("Костюмы", self.costumes.as_str().to_string()),
            ("Эффекты", list(&self.effects)),
        ]
    }
}

/// A scene header together with its breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneBreakdown {
    pub scene_header: String,
    pub analysis: SceneAnalysis,
}

/// Result of parsing a whole script.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedScript {
    pub scenes: Vec<SceneBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_serializes_with_category_names_in_order() {
        let analysis = SceneAnalysis {
            characters: vec!["Анна".to_string()],
            makeup: MakeupKind::Special,
            ..SceneAnalysis::default()
        };

        let json = serde_json::to_string(&analysis).unwrap();
        assert_eq!(
            json,
            r#"{"Персонажи":["Анна"],"Массовка":[],"Реквизит":[],"Грим":"особый","Костюмы":"повседневные","Эффекты":[]}"#
        );
    }

    #[test]
    fn rows_render_empty_lists_as_dash() {
        let rows = SceneAnalysis::default().rows();
        assert_eq!(rows[1], ("Массовка", "-".to_string()));
        assert_eq!(rows[3], ("Грим", "стандартный".to_string()));
    }
}
