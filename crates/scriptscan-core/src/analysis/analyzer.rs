use std::collections::BTreeSet;
use std::sync::Arc;

use super::heuristic::HeuristicMatcher;
use super::lexicon::Lexicon;
use crate::domain::{CostumeKind, EntityLabel, MakeupKind, SceneAnalysis};
use crate::ports::EntityRecognizer;

/// Produces the production breakdown of a scene.
///
/// Makeup and costume are always decided from lexicon hints. Characters,
/// crowd, props and effects come from the entity recognizer when one is
/// configured, and from the lexicon otherwise.
#[derive(Clone)]
pub struct SceneAnalyzer {
    matcher: HeuristicMatcher,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl std::fmt::Debug for SceneAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneAnalyzer")
            .field("recognizer", &self.recognizer.as_ref().map(|r| r.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl SceneAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: HeuristicMatcher::new(lexicon)?,
            recognizer: None,
        })
    }

    /// Use `recognizer` for the entity categories.
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Name of the active recognizer, `None` for the heuristic fallback.
    pub fn recognizer_name(&self) -> Option<&str> {
        self.recognizer.as_deref().map(|r| r.name())
    }

    pub fn analyze(&self, text: &str) -> SceneAnalysis {
        let lowered = text.to_lowercase();

        let makeup = if self.matcher.has_makeup_hint(&lowered) {
            MakeupKind::Special
        } else {
            MakeupKind::Standard
        };
        let costumes = if self.matcher.has_costume_hint(&lowered) {
            CostumeKind::Specific
        } else {
            CostumeKind::Everyday
        };

        let mut analysis = SceneAnalysis {
            makeup,
            costumes,
            ..SceneAnalysis::default()
        };

        if let Some(recognizer) = &self.recognizer {
            let mut characters = BTreeSet::new();
            let mut crowd = BTreeSet::new();
            let mut props = BTreeSet::new();
            let mut effects = BTreeSet::new();

            for entity in recognizer.recognize(text) {
                let bucket = match entity.label {
                    EntityLabel::Person => &mut characters,
                    EntityLabel::Crowd => &mut crowd,
                    EntityLabel::Prop => &mut props,
                    EntityLabel::Effect => &mut effects,
                    EntityLabel::Other(_) => continue,
                };
                bucket.insert(entity.text);
            }

            analysis.characters = characters.into_iter().collect();
            analysis.crowd = crowd.into_iter().collect();
            analysis.props = props.into_iter().collect();
            analysis.effects = effects.into_iter().collect();
        } else {
            analysis.characters = self.matcher.characters(text);
            analysis.crowd = self.matcher.crowd(&lowered);
            analysis.props = self.matcher.props(&lowered);
            analysis.effects = self.matcher.effects(&lowered);
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;
    use crate::ports::NoopRecognizer;

    struct FixedRecognizer(Vec<Entity>);

    impl EntityRecognizer for FixedRecognizer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn recognize(&self, _text: &str) -> Vec<Entity> {
            self.0.clone()
        }
    }

    fn entity(text: &str, label: &str) -> Entity {
        Entity {
            text: text.to_string(),
            label: EntityLabel::from(label),
        }
    }

    #[test]
    fn heuristic_breakdown() {
        let analyzer = SceneAnalyzer::new(&Lexicon::default()).unwrap();
        let analysis = analyzer.analyze("Анна садится в машину. Идёт дождь, на ней деловой костюм.");

        assert_eq!(analysis.characters, vec!["Анна", "Идёт"]);
        assert_eq!(analysis.props, vec!["машину"]);
        assert_eq!(analysis.effects, vec!["дождь"]);
        assert!(analysis.crowd.is_empty());
        assert_eq!(analysis.costumes, CostumeKind::Specific);
        assert_eq!(analysis.makeup, MakeupKind::Standard);
        assert_eq!(analyzer.recognizer_name(), None);
    }

    #[test]
    fn recognizer_replaces_entity_categories_only() {
        let recognizer = FixedRecognizer(vec![
            entity("Олег", "PERSON"),
            entity("Олег", "PERSON"),
            entity("зеваки", "MASSOVKA"),
            entity("гитара", "PROP"),
            entity("туман", "EFFECT"),
            entity("Москва", "LOC"),
        ]);
        let analyzer = SceneAnalyzer::new(&Lexicon::default())
            .unwrap()
            .with_recognizer(Arc::new(recognizer));

        let analysis = analyzer.analyze("Машина. На лице кровь.");

        assert_eq!(analysis.characters, vec!["Олег"]);
        assert_eq!(analysis.crowd, vec!["зеваки"]);
        assert_eq!(analysis.props, vec!["гитара"]);
        assert_eq!(analysis.effects, vec!["туман"]);
        assert_eq!(analysis.makeup, MakeupKind::Special);
        assert_eq!(analyzer.recognizer_name(), Some("fixed"));
    }

    #[test]
    fn empty_recognizer_does_not_fall_back_to_heuristics() {
        let analyzer = SceneAnalyzer::new(&Lexicon::default())
            .unwrap()
            .with_recognizer(Arc::new(NoopRecognizer));

        let analysis = analyzer.analyze("Анна садится в машину. Толпа, дождь, на лице кровь.");

        assert!(analysis.characters.is_empty());
        assert!(analysis.crowd.is_empty());
        assert!(analysis.props.is_empty());
        assert!(analysis.effects.is_empty());
        assert_eq!(analysis.makeup, MakeupKind::Special);
        assert_eq!(analyzer.recognizer_name(), Some("noop"));
    }
}
