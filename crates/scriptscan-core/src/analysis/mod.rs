//! Scene breakdown: lexicon, heuristic matcher and the analyzer facade.

mod analyzer;
mod heuristic;
mod lexicon;

pub use analyzer::SceneAnalyzer;
pub use heuristic::HeuristicMatcher;
pub use lexicon::{Lexicon, LexiconError};
