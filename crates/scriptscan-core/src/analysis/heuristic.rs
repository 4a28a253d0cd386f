//! Dictionary and pattern based extraction, used when no entity model is
//! available.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::lexicon::Lexicon;

/// A capitalized Cyrillic word of three or more letters.
static NAME_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[А-ЯЁ][а-яё]{2,}\b").expect("name pattern is valid")
});

/// Compiled form of a [`Lexicon`].
#[derive(Debug, Clone)]
pub struct HeuristicMatcher {
    crowd: Option<Regex>,
    props: Option<Regex>,
    effects: Option<Regex>,
    costume_hints: Vec<String>,
    makeup_hints: Vec<String>,
    name_exclusions: BTreeSet<String>,
}

/// Build `\b(?:stem1|stem2)\w*`, or `None` for an empty stem list.
fn stem_pattern(stems: &[String]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = stems
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .map(|s| regex::escape(&s))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!(r"\b(?:{})\w*", alternatives.join("|"))).map(Some)
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl HeuristicMatcher {
    pub fn new(lexicon: &Lexicon) -> Result<Self, regex::Error> {
        Ok(Self {
            crowd: stem_pattern(&lexicon.crowd)?,
            props: stem_pattern(&lexicon.props)?,
            effects: stem_pattern(&lexicon.effects)?,
            costume_hints: lowercase_all(&lexicon.costume_hints),
            makeup_hints: lowercase_all(&lexicon.makeup_hints),
            name_exclusions: lexicon
                .name_exclusions
                .iter()
                .map(|s| s.to_uppercase())
                .collect(),
        })
    }

    /// Capitalized words that are not scene-heading vocabulary.
    pub fn characters(&self, text: &str) -> Vec<String> {
        let names: BTreeSet<String> = NAME_CANDIDATE
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|word| !self.name_exclusions.contains(&word.to_uppercase()))
            .map(title_case)
            .collect();
        names.into_iter().collect()
    }

    pub fn crowd(&self, lowered: &str) -> Vec<String> {
        words_matching(self.crowd.as_ref(), lowered)
    }

    pub fn props(&self, lowered: &str) -> Vec<String> {
        words_matching(self.props.as_ref(), lowered)
    }

    pub fn effects(&self, lowered: &str) -> Vec<String> {
        words_matching(self.effects.as_ref(), lowered)
    }

    pub fn has_costume_hint(&self, lowered: &str) -> bool {
        self.costume_hints.iter().any(|h| lowered.contains(h.as_str()))
    }

    pub fn has_makeup_hint(&self, lowered: &str) -> bool {
        self.makeup_hints.iter().any(|h| lowered.contains(h.as_str()))
    }
}

fn words_matching(pattern: Option<&Regex>, lowered: &str) -> Vec<String> {
    let Some(pattern) = pattern else {
        return Vec::new();
    };
    let found: BTreeSet<String> = pattern
        .find_iter(lowered)
        .map(|m| m.as_str().to_string())
        .collect();
    found.into_iter().collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> HeuristicMatcher {
        HeuristicMatcher::new(&Lexicon::default()).unwrap()
    }

    #[test]
    fn characters_skip_heading_words_and_short_words() {
        let names = matcher().characters("ИНТ. Кухня. День. Анна и Олег. Он ждёт Анну. Ян");
        assert_eq!(names, vec!["Анна", "Анну", "Кухня", "Олег"]);
    }

    #[test]
    fn stems_match_whole_words() {
        let text = "толпа прохожих смотрит на машину. машина стоит.";
        let m = matcher();
        assert_eq!(m.crowd(text), vec!["прохожих", "толпа"]);
        assert_eq!(m.props(text), vec!["машина", "машину"]);
        assert!(m.effects(text).is_empty());
    }

    #[test]
    fn stem_inside_a_word_does_not_match() {
        assert!(matcher().effects("задымление в подъезде").is_empty());
    }

    #[test]
    fn hints_are_substrings() {
        let m = matcher();
        assert!(m.has_costume_hint("на нём военная форма"));
        assert!(!m.has_costume_hint("он в джинсах"));
        assert!(m.has_makeup_hint("на лице кровь"));
    }

    #[test]
    fn empty_stem_list_matches_nothing() {
        let lexicon = Lexicon {
            props: Vec::new(),
            ..Lexicon::default()
        };
        let m = HeuristicMatcher::new(&lexicon).unwrap();
        assert!(m.props("машина").is_empty());
    }
}
