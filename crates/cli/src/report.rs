use lexis_engine::{DocumentRewrite, SubstitutionResult};
use lexis_vocabulary::Candidate;

pub fn render_explain(word: &str, sentence: &str, results: &[SubstitutionResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Word: {word}\nSentence: {sentence}\n\n"));
    if results.is_empty() {
        out.push_str("No candidates.\n");
        return out;
    }

    let width = results
        .iter()
        .map(|r| r.candidate.chars().count())
        .max()
        .unwrap_or(0)
        .max("candidate".len());
    out.push_str(&format!(
        "{:<width$}  {:<18}  {:>10}  {:>8}  {:>8}\n",
        "candidate", "reason", "similarity", "syntax", "semantic"
    ));
    for result in results {
        out.push_str(&format!(
            "{:<width$}  {:<18}  {:>10.3}  {:>8.3}  {:>8.3}\n",
            result.candidate,
            result.reason.as_str(),
            result.similarity,
            result.syntax_score,
            result.semantic_score
        ));
    }
    out
}

pub fn render_vocab_word(word: &str, candidates: &[Candidate]) -> String {
    let mut out = String::new();
    if candidates.is_empty() {
        out.push_str(&format!("{word}: no candidates\n"));
        return out;
    }
    out.push_str(&format!("{word}\n"));
    for candidate in candidates {
        if candidate.definition.is_empty() {
            out.push_str(&format!("  - {} [{}]\n", candidate.word, candidate.domain));
        } else {
            out.push_str(&format!(
                "  - {} [{}]: {}\n",
                candidate.word, candidate.domain, candidate.definition
            ));
        }
    }
    out
}

pub fn render_vocab_index(entries: &[(String, Vec<Candidate>)]) -> String {
    entries
        .iter()
        .map(|(word, candidates)| {
            let words: Vec<&str> = candidates.iter().map(|c| c.word.as_str()).collect();
            format!("{word}: {}\n", words.join(", "))
        })
        .collect()
}

/// Summary written to stderr after a plain-text rewrite
pub fn render_rewrite_summary(rewrite: &DocumentRewrite) -> String {
    let pairs: Vec<String> = rewrite
        .substitutions
        .iter()
        .map(|s| format!("{} -> {}", s.original, s.replacement))
        .collect();
    if pairs.is_empty() {
        "0 substitutions".to_string()
    } else {
        format!(
            "{} substitution(s): {}",
            rewrite.substitutions_made,
            pairs.join(", ")
        )
    }
}
