use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity label understood by the breakdown.
///
/// Training data may carry labels that have no breakdown category; those
/// are kept as `Other` so a model can round-trip them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Crowd,
    Prop,
    Effect,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Crowd => "MASSOVKA",
            Self::Prop => "PROP",
            Self::Effect => "EFFECT",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "PERSON" => Self::Person,
            "MASSOVKA" => Self::Crowd,
            "PROP" => Self::Prop,
            "EFFECT" => Self::Effect,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}
