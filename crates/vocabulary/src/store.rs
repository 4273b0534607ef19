use crate::builtin::BUILTIN_VOCABULARY;
use crate::error::{Result, VocabularyError};
use crate::types::{Candidate, VocabularyRecord};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type Table = HashMap<String, Vec<Candidate>>;

/// Normalize a word into its lookup key (trimmed, lowercase)
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Builtin + user-extensible synonym store.
///
/// The custom table sits behind `RwLock<Arc<_>>`: readers clone the `Arc`
/// (a snapshot) and release the lock immediately, writers copy-on-write. A
/// document pass that takes a snapshot never observes a half-applied batch
/// entry.
pub struct VocabularyStore {
    builtin: Arc<Table>,
    custom: RwLock<Arc<Table>>,
}

impl VocabularyStore {
    /// Store backed by the builtin tables
    pub fn new() -> Self {
        Self::with_builtin(BUILTIN_VOCABULARY.clone())
    }

    /// Store backed by an explicit builtin table (keys are normalized)
    pub fn with_builtin(builtin: HashMap<String, Vec<Candidate>>) -> Self {
        let builtin = builtin
            .into_iter()
            .map(|(word, candidates)| (normalize_key(&word), candidates))
            .collect();
        Self {
            builtin: Arc::new(builtin),
            custom: RwLock::new(Arc::new(Table::new())),
        }
    }

    /// Store with no builtin entries at all
    pub fn empty() -> Self {
        Self::with_builtin(HashMap::new())
    }

    /// Candidates for `word`: builtin first, then custom, no deduplication
    pub fn lookup(&self, word: &str) -> Vec<Candidate> {
        let key = normalize_key(word);
        let custom = self.custom_snapshot();

        let mut candidates = self.builtin.get(&key).cloned().unwrap_or_default();
        if let Some(extra) = custom.get(&key) {
            candidates.extend(extra.iter().cloned());
        }
        candidates
    }

    /// Whether `word` has at least one candidate in either table
    pub fn contains(&self, word: &str) -> bool {
        let key = normalize_key(word);
        self.builtin.get(&key).is_some_and(|c| !c.is_empty())
            || self.custom_snapshot().get(&key).is_some_and(|c| !c.is_empty())
    }

    /// Validate and append one ingestion record.
    ///
    /// `index` is only used for error reporting.
    pub fn add_custom_entry(&self, index: usize, record: &VocabularyRecord) -> Result<Candidate> {
        let (key, candidate) = record.validate(index)?;

        let mut guard = self
            .custom
            .write()
            .map_err(|_| VocabularyError::LockPoisoned)?;
        Arc::make_mut(&mut guard)
            .entry(key.clone())
            .or_default()
            .push(candidate.clone());

        log::debug!("Custom vocabulary: {} -> {}", key, candidate.word);
        Ok(candidate)
    }

    /// Append a batch of records, stopping at the first invalid one.
    ///
    /// Records accepted before the failure stay in the store.
    pub fn add_custom(&self, records: &[VocabularyRecord]) -> Result<usize> {
        for (index, record) in records.iter().enumerate() {
            self.add_custom_entry(index, record)?;
        }
        Ok(records.len())
    }

    /// Drop every custom entry
    pub fn clear_custom(&self) {
        let mut guard = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(Table::new());
        log::info!("Custom vocabulary cleared");
    }

    /// Number of custom candidates across all words
    pub fn custom_len(&self) -> usize {
        self.custom_snapshot().values().map(Vec::len).sum()
    }

    /// Builtin lookup keys, sorted
    pub fn builtin_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.builtin.keys().cloned().collect();
        words.sort();
        words
    }

    /// Every candidate word in the builtin table, in key order
    pub fn builtin_candidates(&self) -> Vec<Candidate> {
        self.builtin_words()
            .iter()
            .filter_map(|word| self.builtin.get(word))
            .flat_map(|candidates| candidates.iter().cloned())
            .collect()
    }

    fn custom_snapshot(&self) -> Arc<Table> {
        self.custom
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartOfSpeech;
    use pretty_assertions::assert_eq;

    fn words(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.word.as_str()).collect()
    }

    fn tiny_store() -> VocabularyStore {
        let mut builtin = HashMap::new();
        builtin.insert(
            "Hot".to_string(),
            vec![
                Candidate::new("scorching", PartOfSpeech::Adjective),
                Candidate::new("sweltering", PartOfSpeech::Adjective),
            ],
        );
        VocabularyStore::with_builtin(builtin)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = tiny_store();
        assert_eq!(words(&store.lookup("HOT")), vec!["scorching", "sweltering"]);
        assert_eq!(words(&store.lookup(" hot ")), vec!["scorching", "sweltering"]);
        assert!(store.lookup("cold").is_empty());
    }

    #[test]
    fn test_builtin_first_then_custom() {
        let store = tiny_store();
        store
            .add_custom(&[VocabularyRecord::new("hot", "torrid")])
            .unwrap();

        assert_eq!(
            words(&store.lookup("hot")),
            vec!["scorching", "sweltering", "torrid"]
        );
    }

    #[test]
    fn test_duplicate_custom_entries_accumulate() {
        let store = tiny_store();
        let record = VocabularyRecord::new("hot", "torrid");
        store.add_custom(&[record.clone(), record]).unwrap();

        assert_eq!(store.custom_len(), 2);
        assert_eq!(store.lookup("hot").len(), 4);
    }

    #[test]
    fn test_partial_batch_is_not_rolled_back() {
        let store = tiny_store();
        let batch = vec![
            VocabularyRecord::new("cold", "frigid"),
            VocabularyRecord {
                word: Some("cold".to_string()),
                ..Default::default()
            },
            VocabularyRecord::new("cold", "glacial"),
        ];

        let err = store.add_custom(&batch).unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidEntry { index: 1, .. }));
        assert_eq!(words(&store.lookup("cold")), vec!["frigid"]);
        assert!(store.contains("cold"));
    }

    #[test]
    fn test_clear_custom_keeps_builtin() {
        let store = tiny_store();
        store
            .add_custom(&[VocabularyRecord::new("big", "colossal")])
            .unwrap();
        assert!(store.contains("big"));

        store.clear_custom();
        assert!(!store.contains("big"));
        assert_eq!(store.lookup("hot").len(), 2);
        assert_eq!(store.custom_len(), 0);
    }

    #[test]
    fn test_default_store_has_builtin_words() {
        let store = VocabularyStore::new();
        assert!(store.contains("hot"));
        assert!(!store.builtin_words().is_empty());
        assert!(!store.builtin_candidates().is_empty());
    }
}
