//! Trainable entity model.
//!
//! The model is a gazetteer: surface forms learned from annotated
//! examples, each mapped to the label it was most often annotated with.
//! It plugs into the analyzer through [`crate::ports::EntityRecognizer`].

mod error;
mod gazetteer;
mod training;

pub use error::ModelError;
pub use gazetteer::{EntityModel, GazetteerRecognizer, MODEL_FORMAT_VERSION};
pub use training::{TrainingExample, TrainingReport, fit, load_examples, train};
