//! Core of scriptscan: screenplay scene breakdown.
//!
//! Documents are turned into text ([`extract`]), split into numbered scenes
//! ([`text`]) and analyzed into a production breakdown ([`analysis`]):
//! characters, crowd, props, makeup, costumes and effects. An optional
//! trained entity model ([`model`]) replaces the keyword heuristics for the
//! entity categories.
//!
//! Adapters (HTTP, CLI) depend on this crate, never the other way around.

#![deny(unused_crate_dependencies)]

pub mod analysis;
pub mod domain;
pub mod extract;
pub mod model;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod text;

// Re-export commonly used types for convenience
pub use analysis::{HeuristicMatcher, Lexicon, LexiconError, SceneAnalyzer};
pub use domain::{
    CostumeKind, Entity, EntityLabel, FALLBACK_SCENE_HEADER, MakeupKind, ParsedScript, Scene,
    SceneAnalysis, SceneBreakdown,
};
pub use extract::{DocumentFormat, ExtractError, extract_text};
pub use model::{EntityModel, GazetteerRecognizer, ModelError, TrainingReport, train};
pub use ports::{CoreError, EntityRecognizer, ModelSource, ModelSourceError, NoopRecognizer};
pub use services::{
    ModelStatus, ProvisionOptions, ProvisionReport, Provisioner, ScriptService, StepStatus,
};
pub use settings::{
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, ServerSettings, SettingsError,
    validate_settings,
};
pub use text::split_scenes;

// Re-export path utilities
pub use paths::{
    DirectoryCreationStrategy, HomeSource, PathError, ResolvedPaths, WorkspaceLayout,
    ensure_directory, persist_env_value,
};
