//! Gazetteer entity model: a trained table of surface forms and labels.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::domain::{Entity, EntityLabel};
use crate::ports::EntityRecognizer;

/// Version written into model files; bumped on incompatible changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// A trained entity model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityModel {
    pub version: u32,
    pub trained_at: DateTime<Utc>,
    /// Every label seen in the training data, sorted.
    pub labels: Vec<EntityLabel>,
    /// Lowercased surface form to label.
    pub entries: BTreeMap<String, EntityLabel>,
}

impl EntityModel {
    pub fn new(labels: Vec<EntityLabel>, entries: BTreeMap<String, EntityLabel>) -> Self {
        Self {
            version: MODEL_FORMAT_VERSION,
            trained_at: Utc::now(),
            labels,
            entries,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|e| ModelError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if model.version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: model.version,
                expected: MODEL_FORMAT_VERSION,
            });
        }

        Ok(model)
    }

    /// Write the model as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |e: std::io::Error| ModelError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ModelError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(io_err)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// [`EntityRecognizer`] backed by an [`EntityModel`].
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    pattern: Option<Regex>,
    labels: HashMap<String, EntityLabel>,
}

/// Word boundary for an edge character, or nothing for punctuation.
fn boundary(c: Option<char>) -> &'static str {
    match c {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => "",
    }
}

impl GazetteerRecognizer {
    pub fn new(model: &EntityModel) -> Result<Self, regex::Error> {
        let mut forms: Vec<&String> = model.entries.keys().filter(|f| !f.is_empty()).collect();
        // Longest first so "красная машина" wins over "машина".
        forms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let pattern = if forms.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = forms
                .iter()
                .map(|form| {
                    format!(
                        "{}{}{}",
                        boundary(form.chars().next()),
                        regex::escape(form),
                        boundary(form.chars().last())
                    )
                })
                .collect();
            Some(Regex::new(&format!("(?i){}", alternatives.join("|")))?)
        };

        Ok(Self {
            pattern,
            labels: model
                .entries
                .iter()
                .map(|(form, label)| (form.clone(), label.clone()))
                .collect(),
        })
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn recognize(&self, text: &str) -> Vec<Entity> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        pattern
            .find_iter(text)
            .filter_map(|m| {
                let label = self.labels.get(&m.as_str().to_lowercase())?;
                Some(Entity {
                    text: m.as_str().to_string(),
                    label: label.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn model(entries: &[(&str, &str)]) -> EntityModel {
        let entries: BTreeMap<String, EntityLabel> = entries
            .iter()
            .map(|(form, label)| ((*form).to_string(), EntityLabel::from(*label)))
            .collect();
        let mut labels: Vec<EntityLabel> = entries.values().cloned().collect();
        labels.sort();
        labels.dedup();
        EntityModel::new(labels, entries)
    }

    #[test]
    fn recognizes_whole_words_case_insensitively() {
        let recognizer = GazetteerRecognizer::new(&model(&[
            ("анна", "PERSON"),
            ("саксофон", "PROP"),
        ]))
        .unwrap();

        let found = recognizer.recognize("Анна играет на САКСОФОНЕ, потом берёт саксофон.");
        assert_eq!(
            found,
            vec![
                Entity {
                    text: "Анна".to_string(),
                    label: EntityLabel::Person
                },
                Entity {
                    text: "саксофон".to_string(),
                    label: EntityLabel::Prop
                },
            ]
        );
    }

    #[test]
    fn longest_form_wins() {
        let recognizer = GazetteerRecognizer::new(&model(&[
            ("машина", "PROP"),
            ("пожарная машина", "EFFECT"),
        ]))
        .unwrap();

        let found = recognizer.recognize("Подъезжает пожарная машина.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "пожарная машина");
        assert_eq!(found[0].label, EntityLabel::Effect);
    }

    #[test]
    fn forms_with_punctuation_edges_still_match() {
        let recognizer = GazetteerRecognizer::new(&model(&[("«чайка»", "PROP")])).unwrap();
        let found = recognizer.recognize("Книга «Чайка» на столе");
        assert_eq!(found[0].text, "«Чайка»");
    }

    #[test]
    fn empty_model_finds_nothing() {
        let recognizer = GazetteerRecognizer::new(&model(&[])).unwrap();
        assert!(recognizer.recognize("Анна").is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model").join("entities.json");
        let original = model(&[("дым", "EFFECT"), ("москва", "LOC")]);

        original.save(&path).unwrap();
        let loaded = EntityModel::load(&path).unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            EntityModel::load(&dir.path().join("nope.json")),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.json");
        let mut future = model(&[]);
        future.version = MODEL_FORMAT_VERSION + 1;
        future.save(&path).unwrap();

        assert!(matches!(
            EntityModel::load(&path),
            Err(ModelError::UnsupportedVersion { .. })
        ));
    }
}
