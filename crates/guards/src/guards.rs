use crate::tables::{GuardTables, Idiom, BUILTIN_TABLES};
use crate::text::{
    ends_sentence, find_first_word, preceding_tokens, previous_raw_token, starts_uppercase,
    strip_punctuation, tokens_with_offsets,
};
use serde::Serialize;

/// Outcome of the negation/intensifier scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegationVerdict {
    /// A negator or diminisher sits inside the window
    pub negated: bool,

    /// Phrase to evaluate downstream: the word itself, or "intensifier word"
    pub target: String,
}

/// Stateless context guards over a set of lookup tables
#[derive(Debug, Clone)]
pub struct Guards {
    tables: GuardTables,
}

impl Guards {
    /// Guards over the builtin English tables
    pub fn new() -> Self {
        Self::with_tables(BUILTIN_TABLES.clone())
    }

    pub fn with_tables(tables: GuardTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &GuardTables {
        &self.tables
    }

    /// Symmetric antonym membership
    pub fn is_antonym(&self, a: &str, b: &str) -> bool {
        self.tables.contains_antonym(a, b)
    }

    /// First idiom registered for `word` whose phrase occurs in the sentence
    pub fn matching_idiom(&self, sentence: &str, word: &str) -> Option<&Idiom> {
        let lowered = sentence.to_lowercase();
        self.tables
            .idioms_for(word)
            .iter()
            .find(|idiom| lowered.contains(&idiom.phrase))
    }

    pub fn is_idiom(&self, sentence: &str, word: &str) -> bool {
        self.matching_idiom(sentence, word).is_some()
    }

    /// Whether the first occurrence of `word` is part of a name.
    ///
    /// Three signals, any of which is enough:
    /// 1. a known proper-noun phrase containing the word occurs in the sentence
    /// 2. the occurrence falls inside a "Title Capitalized" span
    /// 3. the occurrence is capitalized and does not start a sentence
    pub fn is_proper_noun(&self, sentence: &str, word: &str) -> bool {
        let key = word.trim().to_lowercase();
        if key.is_empty() {
            return false;
        }

        let phrase_hit = self
            .tables
            .proper_nouns()
            .iter()
            .filter(|phrase| phrase.split_whitespace().any(|w| w == key))
            .any(|phrase| find_first_word(sentence, phrase).is_some());
        if phrase_hit {
            return true;
        }

        let Some(occurrence) = find_first_word(sentence, &key) else {
            return false;
        };

        let tokens = tokens_with_offsets(sentence);
        let title_hit = tokens.windows(2).any(|pair| {
            let (title_range, title) = &pair[0];
            let (name_range, name) = &pair[1];
            self.tables
                .is_title(&strip_punctuation(title).to_lowercase())
                && starts_uppercase(name)
                && occurrence.start >= title_range.start
                && occurrence.end <= name_range.end
        });
        if title_hit {
            return true;
        }

        let capitalized = starts_uppercase(&sentence[occurrence.clone()]);
        capitalized
            && previous_raw_token(sentence, occurrence.start).is_some_and(|prev| !ends_sentence(prev))
    }

    /// Scan the `window` tokens before the first occurrence of `word`.
    ///
    /// Any negator or diminisher in the window negates. Otherwise an
    /// intensifier directly in front widens the target to "intensifier word".
    pub fn negation(&self, sentence: &str, word: &str, window: usize) -> NegationVerdict {
        let word = word.trim();
        let plain = NegationVerdict {
            negated: false,
            target: word.to_string(),
        };
        let Some(occurrence) = find_first_word(sentence, word) else {
            return plain;
        };

        let before = preceding_tokens(sentence, occurrence.start, window);
        if before
            .iter()
            .any(|t| self.tables.is_negator(t) || self.tables.is_diminisher(t))
        {
            return NegationVerdict {
                negated: true,
                target: word.to_string(),
            };
        }

        match before.last() {
            Some(prev) if self.tables.is_intensifier(prev) => NegationVerdict {
                negated: false,
                target: format!("{prev} {word}"),
            },
            _ => plain,
        }
    }
}

impl Default for Guards {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_antonym_both_orders() {
        let guards = Guards::new();
        assert!(guards.is_antonym("hot", "cold"));
        assert!(guards.is_antonym("COLD", "hot"));
        assert!(!guards.is_antonym("hot", "scorching"));
    }

    #[test]
    fn test_idiom_substring_match() {
        let guards = Guards::new();
        let idiom = guards
            .matching_idiom("I got myself in HOT WATER.", "hot")
            .expect("idiom");
        assert_eq!(idiom.phrase, "hot water");
        assert!(!guards.is_idiom("The water was hot.", "hot"));
        assert!(!guards.is_idiom("I got myself in hot water.", "cold"));
    }

    #[test]
    fn test_proper_noun_phrase() {
        let guards = Guards::new();
        assert!(guards.is_proper_noun("Hot Springs Hotel welcomed guests.", "hot"));
        assert!(guards.is_proper_noun("we flew to new york", "new"));
        assert!(!guards.is_proper_noun("We bought a new yorkie.", "new"));
    }

    #[test]
    fn test_proper_noun_title_span() {
        let guards = Guards::new();
        assert!(guards.is_proper_noun("They met President Strong yesterday.", "strong"));
        assert!(!guards.is_proper_noun("The president made a strong case.", "strong"));
    }

    #[test]
    fn test_proper_noun_mid_sentence_capital() {
        let guards = Guards::new();
        assert!(guards.is_proper_noun("We visited Big Creek today.", "big"));
        assert!(!guards.is_proper_noun("Big dogs bark. Small dogs yap.", "big"));
        assert!(!guards.is_proper_noun("Dogs bark. Big dogs bark louder.", "big"));
        assert!(!guards.is_proper_noun("The big dog barked.", "big"));
    }

    #[test]
    fn test_proper_noun_uses_first_occurrence_only() {
        let guards = Guards::new();
        assert!(!guards.is_proper_noun("a big day at Big Creek", "big"));
    }

    #[test]
    fn test_negation_window() {
        let guards = Guards::new();
        let verdict = guards.negation("He was not very hot about the idea.", "hot", 4);
        assert!(verdict.negated);

        let verdict = guards.negation("It was barely warm, not hot.", "warm", 4);
        assert!(verdict.negated);

        let verdict = guards.negation("Not that it matters, the tea was hot.", "hot", 4);
        assert!(!verdict.negated);
    }

    #[test]
    fn test_negation_contraction() {
        let guards = Guards::new();
        assert!(guards.negation("It isn't hot today.", "hot", 4).negated);
    }

    #[test]
    fn test_intensifier_expands_target() {
        let guards = Guards::new();
        let verdict = guards.negation("The soup was very hot.", "hot", 4);
        assert_eq!(
            verdict,
            NegationVerdict {
                negated: false,
                target: "very hot".to_string()
            }
        );

        let verdict = guards.negation("The hot soup was very hot.", "hot", 4);
        assert_eq!(verdict.target, "hot");
    }

    #[test]
    fn test_negation_missing_word() {
        let guards = Guards::new();
        let verdict = guards.negation("nothing to see", "hot", 4);
        assert!(!verdict.negated);
        assert_eq!(verdict.target, "hot");
    }

    #[test]
    fn test_custom_tables() {
        let guards = Guards::with_tables(GuardTables::default().antonym("up", "down").title("agent"));
        assert!(guards.is_antonym("down", "up"));
        assert!(guards.is_proper_noun("meet Agent Smith", "smith"));
        assert!(!guards.is_antonym("hot", "cold"));
    }

    proptest! {
        #[test]
        fn proptest_antonym_symmetry(a in "[a-z]{2,10}", b in "[a-z]{2,10}") {
            let guards = Guards::with_tables(GuardTables::default().antonym(&a, &b));
            prop_assert!(guards.is_antonym(&a, &b));
            prop_assert!(guards.is_antonym(&b, &a));
        }
    }
}
