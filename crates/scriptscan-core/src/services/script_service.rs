//! Script service - the parsing facade shared by the HTTP and CLI adapters.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::{Lexicon, SceneAnalyzer};
use crate::domain::{ParsedScript, SceneBreakdown};
use crate::extract::extract_text;
use crate::model::{EntityModel, GazetteerRecognizer, ModelError};
use crate::paths::WorkspaceLayout;
use crate::ports::CoreError;
use crate::text::split_scenes;

/// Splits scripts into scenes and analyzes each one.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScriptService {
    analyzer: SceneAnalyzer,
}

impl ScriptService {
    pub const fn new(analyzer: SceneAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Build the service from a workspace.
    ///
    /// Uses the workspace `lexicon.json` (or the built-in lexicon) and the
    /// trained entity model when one is present. A missing or unreadable
    /// model falls back to lexicon heuristics.
    pub fn from_workspace(layout: &WorkspaceLayout) -> Result<Self, CoreError> {
        let lexicon = Lexicon::load_or_default(&layout.lexicon_path())?;
        let analyzer = SceneAnalyzer::new(&lexicon)
            .map_err(|e| CoreError::Configuration(format!("invalid lexicon entry: {e}")))?;

        let model_path = layout.model_path();
        let analyzer = match EntityModel::load(&model_path) {
            Ok(model) => {
                let recognizer = GazetteerRecognizer::new(&model)
                    .map_err(|e| CoreError::Internal(format!("entity model pattern: {e}")))?;
                info!(
                    target: "scriptscan.service",
                    path = %model_path.display(),
                    entries = model.len(),
                    "Entity model loaded"
                );
                analyzer.with_recognizer(Arc::new(recognizer))
            }
            Err(ModelError::NotFound(_)) => {
                info!(target: "scriptscan.service", "No entity model, using lexicon heuristics");
                analyzer
            }
            Err(e) => {
                warn!(
                    target: "scriptscan.service",
                    error = %e,
                    "Entity model unusable, using lexicon heuristics"
                );
                analyzer
            }
        };

        Ok(Self::new(analyzer))
    }

    pub const fn analyzer(&self) -> &SceneAnalyzer {
        &self.analyzer
    }

    /// Split `text` into scenes and analyze each body.
    pub fn parse_text(&self, text: &str) -> ParsedScript {
        let scenes = split_scenes(text)
            .into_iter()
            .map(|scene| SceneBreakdown {
                analysis: self.analyzer.analyze(&scene.body),
                scene_header: scene.header,
            })
            .collect();
        ParsedScript { scenes }
    }

    /// Extract text from an uploaded document, then parse it.
    pub fn parse_document(&self, filename: &str, content: &[u8]) -> Result<ParsedScript, CoreError> {
        let text = extract_text(filename, content)?;
        Ok(self.parse_text(&text))
    }
}
