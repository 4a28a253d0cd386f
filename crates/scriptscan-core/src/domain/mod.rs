//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, filesystem, document formats).
//!
//! # Structure
//!
//! - `scene` - Split units of a screenplay (`Scene`)
//! - `analysis` - Per-scene production breakdown and its wire shape
//! - `entity` - Labelled entities produced by recognizers

mod analysis;
mod entity;
mod scene;

pub use analysis::{
    CostumeKind, MakeupKind, ParsedScript, SceneAnalysis, SceneBreakdown,
};
pub use entity::{Entity, EntityLabel};
pub use scene::{FALLBACK_SCENE_HEADER, Scene};
