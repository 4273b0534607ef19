use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A fixed expression the word must not be swapped out of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    /// Lowercase literal phrase
    pub phrase: String,
    pub meaning: String,
}

/// Lookup tables consulted by [`crate::Guards`]. All keys are lowercase.
#[derive(Debug, Clone, Default)]
pub struct GuardTables {
    antonyms: HashSet<(String, String)>,
    idioms: HashMap<String, Vec<Idiom>>,
    proper_nouns: Vec<String>,
    titles: HashSet<String>,
    negators: HashSet<String>,
    diminishers: HashSet<String>,
    intensifiers: HashSet<String>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    let (a, b) = (a.trim().to_lowercase(), b.trim().to_lowercase());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl GuardTables {
    /// Builder: register an unordered antonym pair
    #[must_use]
    pub fn antonym(mut self, a: &str, b: &str) -> Self {
        self.antonyms.insert(pair_key(a, b));
        self
    }

    /// Builder: register an idiom for `word`
    #[must_use]
    pub fn idiom(mut self, word: &str, phrase: &str, meaning: &str) -> Self {
        self.idioms
            .entry(word.trim().to_lowercase())
            .or_default()
            .push(Idiom {
                phrase: phrase.trim().to_lowercase(),
                meaning: meaning.to_string(),
            });
        self
    }

    /// Builder: register a multi-word proper-noun phrase
    #[must_use]
    pub fn proper_noun(mut self, phrase: &str) -> Self {
        self.proper_nouns.push(phrase.trim().to_lowercase());
        self
    }

    /// Builder: register a title word ("president", "dr")
    #[must_use]
    pub fn title(mut self, word: &str) -> Self {
        self.titles.insert(word.trim().to_lowercase());
        self
    }

    #[must_use]
    pub fn negator(mut self, word: &str) -> Self {
        self.negators.insert(word.trim().to_lowercase());
        self
    }

    #[must_use]
    pub fn diminisher(mut self, word: &str) -> Self {
        self.diminishers.insert(word.trim().to_lowercase());
        self
    }

    #[must_use]
    pub fn intensifier(mut self, word: &str) -> Self {
        self.intensifiers.insert(word.trim().to_lowercase());
        self
    }

    pub fn contains_antonym(&self, a: &str, b: &str) -> bool {
        self.antonyms.contains(&pair_key(a, b))
    }

    pub fn idioms_for(&self, word: &str) -> &[Idiom] {
        self.idioms
            .get(&word.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn proper_nouns(&self) -> &[String] {
        &self.proper_nouns
    }

    pub fn is_title(&self, token: &str) -> bool {
        self.titles.contains(token)
    }

    /// Negators, including any contracted "n't" form
    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token) || token.ends_with("n't")
    }

    pub fn is_diminisher(&self, token: &str) -> bool {
        self.diminishers.contains(token)
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.contains(token)
    }

    pub fn antonym_count(&self) -> usize {
        self.antonyms.len()
    }
}

const ANTONYMS: &[(&str, &str)] = &[
    ("hot", "cold"),
    ("hot", "frigid"),
    ("hot", "glacial"),
    ("cold", "scorching"),
    ("cold", "sweltering"),
    ("big", "small"),
    ("big", "diminutive"),
    ("small", "colossal"),
    ("small", "substantial"),
    ("good", "bad"),
    ("good", "dreadful"),
    ("good", "detrimental"),
    ("bad", "excellent"),
    ("bad", "commendable"),
    ("happy", "sad"),
    ("happy", "sorrowful"),
    ("happy", "melancholy"),
    ("sad", "joyful"),
    ("sad", "elated"),
    ("fast", "slow"),
    ("fast", "sluggish"),
    ("fast", "leisurely"),
    ("slow", "rapid"),
    ("slow", "swift"),
    ("hard", "easy"),
    ("hard", "effortless"),
    ("easy", "arduous"),
    ("easy", "challenging"),
    ("old", "new"),
    ("old", "novel"),
    ("old", "innovative"),
    ("new", "ancient"),
    ("new", "antiquated"),
    ("start", "end"),
    ("start", "conclude"),
    ("start", "terminate"),
    ("end", "commence"),
    ("end", "initiate"),
    ("strong", "weak"),
    ("smart", "stupid"),
    ("nice", "nasty"),
    ("important", "trivial"),
    ("help", "hinder"),
    ("show", "conceal"),
    ("show", "hide"),
];

const IDIOMS: &[(&str, &str, &str)] = &[
    ("hot", "hot water", "in trouble"),
    ("hot", "hot potato", "a controversial issue"),
    ("hot", "hot under the collar", "angry or embarrassed"),
    ("hot", "in hot pursuit", "chasing closely"),
    ("hot", "blow hot and cold", "keep changing one's mind"),
    ("hot", "hot air", "empty talk"),
    ("cold", "cold feet", "loss of nerve"),
    ("cold", "cold shoulder", "deliberate unfriendliness"),
    ("cold", "in cold blood", "without feeling"),
    ("cold", "out in the cold", "excluded"),
    ("cold", "cold turkey", "abrupt withdrawal"),
    ("big", "big deal", "something important"),
    ("big", "big picture", "the overall perspective"),
    ("big", "big shot", "an important person"),
    ("small", "small talk", "polite conversation"),
    ("small", "small fry", "unimportant people"),
    ("good", "for good", "forever"),
    ("good", "good grief", "exclamation of dismay"),
    ("good", "as good as", "almost"),
    ("bad", "bad blood", "ill feeling"),
    ("bad", "too bad", "unfortunate"),
    ("bad", "not bad", "fairly good"),
    ("happy", "happy hour", "discounted drinks period"),
    ("happy", "happy medium", "a compromise"),
    ("fast", "fast asleep", "sleeping deeply"),
    ("fast", "hold fast", "remain firm"),
    ("fast", "stand fast", "refuse to yield"),
    ("fast", "fast food", "quickly prepared food"),
    ("slow", "slow burn", "gradually increasing anger"),
    ("hard", "hard feelings", "resentment"),
    ("hard", "hard of hearing", "partially deaf"),
    ("hard", "hard cash", "physical money"),
    ("easy", "take it easy", "relax"),
    ("easy", "easy does it", "proceed carefully"),
    ("old", "old hat", "outdated"),
    ("old", "old school", "traditional"),
    ("new", "brand new", "completely new"),
    ("nice", "nice try", "a good attempt that failed"),
    ("smart", "street smart", "streetwise"),
    ("strong", "going strong", "continuing vigorously"),
    ("strong", "strong suit", "a particular talent"),
    ("end", "at the end of the day", "ultimately"),
    ("end", "end of story", "nothing more to say"),
    ("end", "dead end", "a situation with no progress"),
    ("start", "head start", "an early advantage"),
    ("show", "steal the show", "attract the most attention"),
    ("show", "show of hands", "a vote by raised hands"),
    ("use", "no use", "pointless"),
    ("help", "help yourself", "take freely"),
    ("problem", "no problem", "you are welcome"),
    ("very", "the very thing", "exactly what is needed"),
];

const PROPER_NOUNS: &[&str] = &[
    "hot springs",
    "cold war",
    "cold spring harbor",
    "big ben",
    "big apple",
    "big sur",
    "good friday",
    "good hope",
    "happy valley",
    "new york",
    "new zealand",
    "new delhi",
    "new jersey",
    "new orleans",
    "new mexico",
    "new england",
    "old trafford",
    "old testament",
    "new testament",
    "great lakes",
    "small heath",
    "strong museum",
];

const TITLES: &[&str] = &[
    "president",
    "king",
    "queen",
    "prince",
    "princess",
    "duke",
    "duchess",
    "dr",
    "doctor",
    "mr",
    "mrs",
    "ms",
    "miss",
    "professor",
    "prof",
    "captain",
    "sir",
    "lady",
    "lord",
    "senator",
    "judge",
    "general",
    "saint",
    "st",
    "uncle",
    "aunt",
    "mayor",
    "governor",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "cannot",
    "nowhere",
];

const DIMINISHERS: &[&str] = &[
    "barely", "hardly", "scarcely", "slightly", "somewhat", "rarely", "seldom", "less", "least",
    "little",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "really",
    "extremely",
    "so",
    "too",
    "quite",
    "incredibly",
    "remarkably",
    "truly",
    "highly",
    "especially",
    "particularly",
    "exceptionally",
];

/// Builtin English guard tables
pub static BUILTIN_TABLES: Lazy<GuardTables> = Lazy::new(|| {
    let mut tables = GuardTables::default();
    for (a, b) in ANTONYMS {
        tables = tables.antonym(a, b);
    }
    for (word, phrase, meaning) in IDIOMS {
        tables = tables.idiom(word, phrase, meaning);
    }
    for phrase in PROPER_NOUNS {
        tables = tables.proper_noun(phrase);
    }
    for word in TITLES {
        tables = tables.title(word);
    }
    for word in NEGATORS {
        tables = tables.negator(word);
    }
    for word in DIMINISHERS {
        tables = tables.diminisher(word);
    }
    for word in INTENSIFIERS {
        tables = tables.intensifier(word);
    }
    tables
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key("Hot", "cold"), pair_key("cold", "HOT"));
    }

    #[test]
    fn test_builtin_tables_loaded() {
        let tables = &*BUILTIN_TABLES;
        assert_eq!(tables.antonym_count(), ANTONYMS.len());
        assert!(tables.contains_antonym("frigid", "hot"));
        assert!(!tables.idioms_for("hot").is_empty());
        assert!(tables.idioms_for("zebra").is_empty());
        assert!(tables.is_title("president"));
        assert!(tables.is_negator("isn't"));
        assert!(tables.is_diminisher("barely"));
        assert!(tables.is_intensifier("very"));
    }
}
