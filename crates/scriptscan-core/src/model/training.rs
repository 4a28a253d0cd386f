//! Building an [`EntityModel`] from annotated examples.
//!
//! Training data is a directory of `*.txt` files, each holding a JSON array:
//!
//! ```json
//! [{"text": "Анна берёт чашку", "entities": [[0, 4, "PERSON"], [11, 16, "PROP"]]}]
//! ```
//!
//! Offsets are character positions, end exclusive.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::ModelError;
use super::gazetteer::EntityModel;
use crate::domain::EntityLabel;

#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    entities: Option<Vec<(i64, i64, String)>>,
}

/// An annotated example with its validated spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    /// `(start, end, label)` in character offsets.
    pub spans: Vec<(usize, usize, EntityLabel)>,
}

/// Summary of a training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// Number of `*.txt` files found.
    pub files: usize,
    /// Files skipped because they were not valid JSON example arrays.
    pub skipped_files: Vec<PathBuf>,
    /// Array items skipped because they were not example objects.
    pub skipped_items: usize,
    /// Accepted examples.
    pub examples: usize,
    /// Spans dropped for being out of range.
    pub invalid_spans: usize,
    /// Surface forms in the resulting model.
    pub entries: usize,
    pub labels: Vec<EntityLabel>,
}

impl TrainingExample {
    /// Validate raw spans against `text`. Returns `None` when nothing is usable.
    fn from_raw(raw: RawExample, invalid_spans: &mut usize) -> Option<Self> {
        let text = raw.text.filter(|t| !t.is_empty())?;
        let len = i64::try_from(text.chars().count()).ok()?;

        let spans: Vec<_> = raw
            .entities
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(start, end, label)| {
                if 0 <= start && start < end && end <= len {
                    Some((
                        usize::try_from(start).ok()?,
                        usize::try_from(end).ok()?,
                        EntityLabel::from(label),
                    ))
                } else {
                    *invalid_spans += 1;
                    None
                }
            })
            .collect();

        (!spans.is_empty()).then_some(Self { text, spans })
    }

    /// Surface text of a span.
    fn slice(&self, start: usize, end: usize) -> String {
        self.text.chars().skip(start).take(end - start).collect()
    }
}

fn training_files(data_dir: &Path) -> Result<Vec<PathBuf>, ModelError> {
    let entries = fs::read_dir(data_dir).map_err(|e| ModelError::Io {
        path: data_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

/// Read all annotated examples under `data_dir`.
pub fn load_examples(data_dir: &Path) -> Result<(Vec<TrainingExample>, TrainingReport), ModelError> {
    let files = training_files(data_dir)?;
    let mut report = TrainingReport {
        files: files.len(),
        ..TrainingReport::default()
    };
    let mut examples = Vec::new();

    for path in files {
        let raw = fs::read_to_string(&path).map_err(|e| ModelError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let items: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping file that is not a JSON example array");
                report.skipped_files.push(path);
                continue;
            }
        };

        let before = examples.len();
        for (index, item) in items.into_iter().enumerate() {
            let item: RawExample = match serde_json::from_value(item) {
                Ok(item) => item,
                Err(e) => {
                    warn!(path = %path.display(), index, error = %e, "Skipping malformed training item");
                    report.skipped_items += 1;
                    continue;
                }
            };
            if let Some(example) = TrainingExample::from_raw(item, &mut report.invalid_spans) {
                examples.push(example);
            }
        }
        debug!(path = %path.display(), accepted = examples.len() - before, "Loaded training file");
    }

    report.examples = examples.len();
    if examples.is_empty() {
        return Err(ModelError::NoTrainingData(data_dir.to_path_buf()));
    }

    Ok((examples, report))
}

/// Fit a gazetteer over `examples`.
///
/// Each surface form (trimmed, lowercased) keeps the label it was annotated
/// with most often; ties go to the label seen first. `on_example` is called
/// after every example, for progress reporting.
pub fn fit(examples: &[TrainingExample], mut on_example: impl FnMut(usize)) -> EntityModel {
    let mut votes: HashMap<String, Vec<(EntityLabel, usize)>> = HashMap::new();
    let mut labels = BTreeSet::new();

    for (i, example) in examples.iter().enumerate() {
        for (start, end, label) in &example.spans {
            labels.insert(label.clone());

            let form = example.slice(*start, *end).trim().to_lowercase();
            if form.is_empty() {
                continue;
            }

            let tally = votes.entry(form).or_default();
            match tally.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((label.clone(), 1)),
            }
        }
        on_example(i + 1);
    }

    let entries: BTreeMap<String, EntityLabel> = votes
        .into_iter()
        .filter_map(|(form, tally)| {
            let mut best: Option<&(EntityLabel, usize)> = None;
            for candidate in &tally {
                if best.is_none_or(|(_, count)| candidate.1 > *count) {
                    best = Some(candidate);
                }
            }
            best.map(|(label, _)| (form, label.clone()))
        })
        .collect();

    EntityModel::new(labels.into_iter().collect(), entries)
}

/// Load examples from `data_dir` and fit a model.
///
/// `on_progress(done, total)` is called after every fitted example.
pub fn train(
    data_dir: &Path,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<(EntityModel, TrainingReport), ModelError> {
    let (examples, mut report) = load_examples(data_dir)?;
    let total = examples.len();
    let model = fit(&examples, |done| on_progress(done, total));
    report.entries = model.len();
    report.labels.clone_from(&model.labels);
    Ok((model, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn trains_from_annotated_files() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "a.txt",
            r#"[{"text": "Анна берёт чашку", "entities": [[0, 4, "PERSON"], [11, 16, "PROP"]]}]"#,
        );
        write(
            dir.path(),
            "b.txt",
            r#"[{"text": "Толпа шумит", "entities": [[0, 5, "MASSOVKA"]]}]"#,
        );

        let (model, report) = train(dir.path(), |_, _| {}).unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.examples, 2);
        assert_eq!(model.entries.get("анна"), Some(&EntityLabel::Person));
        assert_eq!(model.entries.get("чашку"), Some(&EntityLabel::Prop));
        assert_eq!(model.entries.get("толпа"), Some(&EntityLabel::Crowd));
        assert_eq!(
            model.labels,
            vec![EntityLabel::Person, EntityLabel::Crowd, EntityLabel::Prop]
        );
    }

    #[test]
    fn non_json_files_are_skipped_and_other_extensions_ignored() {
        let dir = tempdir().unwrap();
        write(dir.path(), "notes.txt", "просто заметки");
        write(dir.path(), "data.json", r#"[{"text": "Дым", "entities": [[0, 3, "EFFECT"]]}]"#);
        write(dir.path(), "ok.txt", r#"[{"text": "Дым", "entities": [[0, 3, "EFFECT"]]}]"#);

        let (model, report) = train(dir.path(), |_, _| {}).unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.skipped_files, vec![dir.path().join("notes.txt")]);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn out_of_range_spans_are_dropped() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "a.txt",
            r#"[
                {"text": "Снег", "entities": [[0, 4, "EFFECT"], [2, 2, "PROP"], [-1, 3, "PROP"], [0, 9, "PROP"]]},
                {"text": "Пусто", "entities": []},
                {"entities": [[0, 1, "PROP"]]}
            ]"#,
        );

        let (model, report) = train(dir.path(), |_, _| {}).unwrap();

        assert_eq!(report.examples, 1);
        assert_eq!(report.invalid_spans, 3);
        assert_eq!(model.entries.get("снег"), Some(&EntityLabel::Effect));
        assert_eq!(model.labels, vec![EntityLabel::Effect]);
    }

    #[test]
    fn majority_label_wins_and_ties_keep_first_seen() {
        let examples = vec![
            TrainingExample {
                text: "ключ".to_string(),
                spans: vec![(0, 4, EntityLabel::Prop)],
            },
            TrainingExample {
                text: "Ключ".to_string(),
                spans: vec![(0, 4, EntityLabel::Effect)],
            },
            TrainingExample {
                text: "ключ".to_string(),
                spans: vec![(0, 4, EntityLabel::Effect)],
            },
            TrainingExample {
                text: "дверь".to_string(),
                spans: vec![(0, 5, EntityLabel::Prop)],
            },
            TrainingExample {
                text: "дверь".to_string(),
                spans: vec![(0, 5, EntityLabel::Effect)],
            },
        ];

        let mut progress = Vec::new();
        let model = fit(&examples, |n| progress.push(n));

        assert_eq!(model.entries.get("ключ"), Some(&EntityLabel::Effect));
        assert_eq!(model.entries.get("дверь"), Some(&EntityLabel::Prop));
        assert_eq!(progress, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_directory_has_no_training_data() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            train(dir.path(), |_, _| {}),
            Err(ModelError::NoTrainingData(_))
        ));
    }

    #[test]
    fn malformed_items_do_not_discard_their_file() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "mixed.txt",
            r#"[
                {"text": "Анна", "entities": [[0, 4, "PERSON"]]},
                {"text": "Пусто", "entities": null},
                {"text": 42, "entities": [[0, 1, "PROP"]]},
                {"text": "Дым", "entities": [["a", 3, "EFFECT"]]},
                "не объект"
            ]"#,
        );

        let mut progress = Vec::new();
        let (model, report) = train(dir.path(), |done, total| progress.push((done, total))).unwrap();

        assert!(report.skipped_files.is_empty());
        assert_eq!(report.skipped_items, 3);
        assert_eq!(report.examples, 1);
        assert_eq!(model.entries.get("анна"), Some(&EntityLabel::Person));
        assert_eq!(progress, vec![(1, 1)]);
    }
}
