use crate::types::{Candidate, PartOfSpeech};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use PartOfSpeech::{Adjective as Adj, Adverb as Adv, Noun, Verb};

struct Seed {
    word: &'static str,
    pos: PartOfSpeech,
    domain: &'static str,
    definition: &'static str,
    examples: &'static [&'static str],
}

const fn seed(
    word: &'static str,
    pos: PartOfSpeech,
    domain: &'static str,
    definition: &'static str,
    examples: &'static [&'static str],
) -> Seed {
    Seed {
        word,
        pos,
        domain,
        definition,
        examples,
    }
}

static SEEDS: &[(&str, &[Seed])] = &[
    (
        "hot",
        &[
            seed(
                "scorching",
                Adj,
                "general",
                "very hot, enough to burn",
                &[
                    "The scorching sun beat down on the travellers.",
                    "We stayed indoors during the scorching afternoon.",
                    "A scorching wind swept across the desert.",
                ],
            ),
            seed(
                "sweltering",
                Adj,
                "literary",
                "uncomfortably hot and humid",
                &[
                    "The sweltering room had no air conditioning.",
                    "Commuters endured a sweltering summer on the trains.",
                ],
            ),
            seed(
                "piping",
                Adj,
                "general",
                "very hot, of food or drink",
                &["She served the soup piping hot.", "A piping mug of tea waited on the desk."],
            ),
        ],
    ),
    (
        "cold",
        &[
            seed(
                "frigid",
                Adj,
                "general",
                "extremely cold",
                &[
                    "The frigid air stung our faces.",
                    "They plunged into the frigid lake.",
                ],
            ),
            seed(
                "glacial",
                Adj,
                "literary",
                "icy, like a glacier",
                &["A glacial wind blew off the mountains."],
            ),
        ],
    ),
    (
        "big",
        &[
            seed(
                "substantial",
                Adj,
                "academic",
                "of considerable size or importance",
                &[
                    "The project received substantial funding.",
                    "There was a substantial increase in sales.",
                ],
            ),
            seed(
                "colossal",
                Adj,
                "literary",
                "extremely large",
                &[
                    "A colossal statue guarded the harbour.",
                    "The launch was a colossal undertaking.",
                ],
            ),
        ],
    ),
    (
        "small",
        &[
            seed(
                "modest",
                Adj,
                "general",
                "limited in size or amount",
                &["They lived in a modest apartment.", "The gains were modest but steady."],
            ),
            seed(
                "diminutive",
                Adj,
                "literary",
                "extremely small",
                &["A diminutive figure stood in the doorway."],
            ),
        ],
    ),
    (
        "good",
        &[
            seed(
                "excellent",
                Adj,
                "general",
                "extremely good",
                &["She gave an excellent presentation.", "The food here is excellent."],
            ),
            seed(
                "commendable",
                Adj,
                "academic",
                "deserving praise",
                &["His commendable effort did not go unnoticed."],
            ),
        ],
    ),
    (
        "bad",
        &[
            seed(
                "dreadful",
                Adj,
                "general",
                "extremely bad or serious",
                &["The weather was dreadful all week.", "It was a dreadful mistake."],
            ),
            seed(
                "detrimental",
                Adj,
                "academic",
                "tending to cause harm",
                &["Smoking is detrimental to health."],
            ),
        ],
    ),
    (
        "happy",
        &[
            seed(
                "joyful",
                Adj,
                "general",
                "feeling or expressing great happiness",
                &["The reunion was a joyful occasion.", "Joyful music filled the hall."],
            ),
            seed(
                "elated",
                Adj,
                "literary",
                "ecstatically happy",
                &["She was elated by the news.", "The elated fans poured onto the field."],
            ),
        ],
    ),
    (
        "sad",
        &[
            seed(
                "melancholy",
                Adj,
                "literary",
                "pensive sadness",
                &["A melancholy tune drifted from the window."],
            ),
            seed(
                "sorrowful",
                Adj,
                "general",
                "feeling or showing grief",
                &["He gave a sorrowful farewell.", "Her sorrowful eyes told the story."],
            ),
        ],
    ),
    (
        "fast",
        &[
            seed(
                "rapid",
                Adj,
                "general",
                "happening in a short time",
                &["The town saw rapid growth.", "A rapid response saved lives."],
            ),
            seed(
                "swift",
                Adj,
                "literary",
                "moving with great speed",
                &["A swift current carried the boat away."],
            ),
        ],
    ),
    (
        "slow",
        &[
            seed(
                "sluggish",
                Adj,
                "general",
                "slow-moving or inactive",
                &["The economy remained sluggish.", "Traffic was sluggish on the bridge."],
            ),
            seed(
                "leisurely",
                Adj,
                "literary",
                "acting without haste",
                &["We took a leisurely stroll along the river."],
            ),
        ],
    ),
    (
        "smart",
        &[
            seed(
                "astute",
                Adj,
                "academic",
                "having sharp judgement",
                &["An astute investor spotted the trend early."],
            ),
            seed(
                "shrewd",
                Adj,
                "general",
                "having sharp powers of judgement",
                &["She made a shrewd move in the negotiation."],
            ),
        ],
    ),
    (
        "important",
        &[
            seed(
                "crucial",
                Adj,
                "general",
                "decisive or critical",
                &["Timing is crucial in this experiment.", "She played a crucial role."],
            ),
            seed(
                "paramount",
                Adj,
                "academic",
                "more important than anything else",
                &["Safety is paramount on the site."],
            ),
        ],
    ),
    (
        "strong",
        &[
            seed(
                "robust",
                Adj,
                "academic",
                "strong and healthy, hard to break",
                &["The system proved robust under load.", "A robust defence held firm."],
            ),
            seed(
                "formidable",
                Adj,
                "literary",
                "inspiring respect through strength",
                &["They faced a formidable opponent."],
            ),
        ],
    ),
    (
        "hard",
        &[
            seed(
                "arduous",
                Adj,
                "literary",
                "involving strenuous effort",
                &["It was an arduous climb to the summit."],
            ),
            seed(
                "challenging",
                Adj,
                "general",
                "testing one's abilities",
                &["The exam was challenging but fair."],
            ),
        ],
    ),
    (
        "easy",
        &[
            seed(
                "effortless",
                Adj,
                "general",
                "requiring no effort",
                &["She made the routine look effortless."],
            ),
            seed(
                "straightforward",
                Adj,
                "academic",
                "uncomplicated and easy to do",
                &["The instructions were straightforward."],
            ),
        ],
    ),
    (
        "old",
        &[
            seed(
                "ancient",
                Adj,
                "general",
                "belonging to the very distant past",
                &["They explored the ancient ruins."],
            ),
            seed(
                "antiquated",
                Adj,
                "academic",
                "old-fashioned or outdated",
                &["The office still used antiquated software."],
            ),
        ],
    ),
    (
        "new",
        &[
            seed(
                "novel",
                Adj,
                "academic",
                "new or unusual in an interesting way",
                &["The team proposed a novel approach."],
            ),
            seed(
                "innovative",
                Adj,
                "general",
                "featuring new methods",
                &["An innovative design won the award."],
            ),
        ],
    ),
    (
        "nice",
        &[
            seed(
                "pleasant",
                Adj,
                "general",
                "giving a sense of enjoyment",
                &["We had a pleasant evening by the lake."],
            ),
            seed(
                "delightful",
                Adj,
                "literary",
                "causing great pleasure",
                &["The garden was delightful in spring."],
            ),
        ],
    ),
    (
        "very",
        &[seed(
            "exceedingly",
            Adv,
            "literary",
            "to an unusually large degree",
            &["The task proved exceedingly difficult."],
        )],
    ),
    (
        "show",
        &[
            seed(
                "demonstrate",
                Verb,
                "academic",
                "clearly show by giving evidence",
                &["The results demonstrate a clear trend."],
            ),
            seed(
                "reveal",
                Verb,
                "general",
                "make known to others",
                &["The survey revealed surprising gaps."],
            ),
        ],
    ),
    (
        "use",
        &[
            seed(
                "utilize",
                Verb,
                "academic",
                "make practical use of",
                &["The lab utilizes advanced imaging."],
            ),
            seed(
                "employ",
                Verb,
                "general",
                "make use of",
                &["They employ a simple technique."],
            ),
        ],
    ),
    (
        "help",
        &[
            seed(
                "assist",
                Verb,
                "general",
                "help by doing a share of the work",
                &["Volunteers assist with the harvest."],
            ),
            seed(
                "facilitate",
                Verb,
                "academic",
                "make an action easier",
                &["The new tool facilitates collaboration."],
            ),
        ],
    ),
    (
        "start",
        &[
            seed(
                "commence",
                Verb,
                "academic",
                "begin",
                &["The ceremony will commence at noon."],
            ),
            seed(
                "initiate",
                Verb,
                "general",
                "cause a process to begin",
                &["They initiated talks with the union."],
            ),
        ],
    ),
    (
        "end",
        &[
            seed(
                "conclude",
                Verb,
                "academic",
                "bring to an end",
                &["The meeting concluded with a vote."],
            ),
            seed(
                "terminate",
                Verb,
                "general",
                "bring to an end",
                &["The contract was terminated early."],
            ),
        ],
    ),
    (
        "problem",
        &[
            seed(
                "dilemma",
                Noun,
                "literary",
                "a difficult choice",
                &["She faced a moral dilemma."],
            ),
            seed(
                "predicament",
                Noun,
                "general",
                "a difficult or unpleasant situation",
                &["The storm left the hikers in a predicament."],
            ),
        ],
    ),
    (
        "idea",
        &[
            seed(
                "notion",
                Noun,
                "general",
                "a conception of something",
                &["He dismissed the notion outright."],
            ),
            seed(
                "concept",
                Noun,
                "academic",
                "an abstract idea",
                &["The concept is easy to grasp."],
            ),
        ],
    ),
];

/// Builtin table, built once on first access
pub static BUILTIN_VOCABULARY: Lazy<HashMap<String, Vec<Candidate>>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(SEEDS.len());
    for (word, seeds) in SEEDS {
        let candidates = seeds
            .iter()
            .map(|s| Candidate {
                word: s.word.to_string(),
                part_of_speech: s.pos,
                domain: s.domain.to_string(),
                definition: s.definition.to_string(),
                examples: s.examples.iter().map(|e| (*e).to_string()).collect(),
            })
            .collect();
        table.insert((*word).to_string(), candidates);
    }
    table
});

/// Borrow the builtin table
pub fn builtin_vocabulary() -> &'static HashMap<String, Vec<Candidate>> {
    &BUILTIN_VOCABULARY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercase_and_unique() {
        let keys: Vec<&str> = SEEDS.iter().map(|(w, _)| *w).collect();
        for key in &keys {
            assert_eq!(*key, key.to_lowercase());
        }
        assert_eq!(BUILTIN_VOCABULARY.len(), keys.len());
    }

    #[test]
    fn test_every_candidate_has_definition_and_example() {
        for (word, candidates) in builtin_vocabulary() {
            assert!(!candidates.is_empty(), "{word} has no candidates");
            for candidate in candidates {
                assert!(!candidate.definition.is_empty(), "{}", candidate.word);
                assert!(!candidate.examples.is_empty(), "{}", candidate.word);
                assert_ne!(&candidate.word, word);
            }
        }
    }
}
