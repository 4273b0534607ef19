use crate::error::{Result, VocabularyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Domain tag given to every user-supplied candidate
pub const CUSTOM_DOMAIN: &str = "custom";

/// Coarse part-of-speech tag carried by a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Adjective,
    Adverb,
    Noun,
    Verb,
    #[default]
    Unknown,
}

/// A proposed synonym for a simpler "original" word
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// The replacement word, inserted verbatim
    pub word: String,

    /// Part of speech the candidate is used as
    pub part_of_speech: PartOfSpeech,

    /// Register/domain tag (general, academic, literary, custom...)
    pub domain: String,

    /// Short human-readable definition
    pub definition: String,

    /// Example sentences; the first few seed the context vectors
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Candidate {
    /// Create a candidate with no definition or examples
    pub fn new(word: impl Into<String>, part_of_speech: PartOfSpeech) -> Self {
        Self {
            word: word.into(),
            part_of_speech,
            domain: "general".to_string(),
            definition: String::new(),
            examples: Vec::new(),
        }
    }

    /// Builder: set domain tag
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Builder: set definition
    #[must_use]
    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Builder: add example sentence
    #[must_use]
    pub fn add_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// One record of the vocabulary ingestion format.
///
/// `word` and `synonym` are optional at the serde level so that a missing
/// field surfaces as [`VocabularyError::InvalidEntry`] instead of a parse
/// failure for the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VocabularyRecord {
    #[serde(default)]
    pub word: Option<String>,

    #[serde(default)]
    pub synonym: Option<String>,

    #[serde(default)]
    pub definition: Option<String>,

    #[serde(default)]
    pub examples: Vec<String>,
}

impl VocabularyRecord {
    pub fn new(word: impl Into<String>, synonym: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            synonym: Some(synonym.into()),
            definition: None,
            examples: Vec::new(),
        }
    }

    #[must_use]
    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    #[must_use]
    pub fn add_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Parse a JSON array of records
    pub fn parse_batch(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON array of records from disk
    pub fn load_batch(path: &Path) -> Result<Vec<Self>> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse_batch(&raw)
    }

    /// Validate and convert into `(lookup key, candidate)`.
    pub(crate) fn validate(&self, index: usize) -> Result<(String, Candidate)> {
        let word = non_blank(self.word.as_deref())
            .ok_or_else(|| VocabularyError::invalid_entry(index, "missing word"))?;
        let synonym = non_blank(self.synonym.as_deref())
            .ok_or_else(|| VocabularyError::invalid_entry(index, "missing synonym"))?;

        let candidate = Candidate {
            word: synonym.to_string(),
            part_of_speech: PartOfSpeech::Unknown,
            domain: CUSTOM_DOMAIN.to_string(),
            definition: self.definition.clone().unwrap_or_default(),
            examples: self.examples.clone(),
        };
        Ok((crate::store::normalize_key(word), candidate))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_batch_defaults() {
        let records = VocabularyRecord::parse_batch(
            r#"[{"word":"big","synonym":"colossal"},{"word":"fast","synonym":"brisk","definition":"quick","examples":["a brisk walk"]}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].definition, None);
        assert!(records[0].examples.is_empty());
        assert_eq!(records[1].examples, vec!["a brisk walk".to_string()]);
    }

    #[test]
    fn test_missing_fields_parse_but_fail_validation() {
        let records = VocabularyRecord::parse_batch(r#"[{"word":"big"},{"synonym":"x"}]"#).unwrap();

        let err = records[0].validate(0).unwrap_err();
        assert!(err.to_string().contains("missing synonym"), "{err}");

        let err = records[1].validate(1).unwrap_err();
        assert!(err.to_string().contains("#1"), "{err}");
        assert!(err.to_string().contains("missing word"), "{err}");
    }

    #[test]
    fn test_validate_normalizes_key_and_fills_defaults() {
        let (key, candidate) = VocabularyRecord::new("  Big ", "colossal").validate(0).unwrap();

        assert_eq!(key, "big");
        assert_eq!(candidate.word, "colossal");
        assert_eq!(candidate.domain, CUSTOM_DOMAIN);
        assert_eq!(candidate.definition, "");
        assert_eq!(candidate.part_of_speech, PartOfSpeech::Unknown);
    }

    #[test]
    fn test_load_batch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"word":"sad","synonym":"morose"}}]"#).unwrap();

        let records = VocabularyRecord::load_batch(file.path()).unwrap();
        assert_eq!(records, vec![VocabularyRecord::new("sad", "morose")]);
    }
}
