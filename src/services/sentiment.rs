//! Word-polarity sentiment scoring.
//!
//! The classifier only needs "text in, signed integer out", so scoring sits
//! behind [`SentimentScorer`] and can be swapped for a richer model.

use std::collections::HashMap;

pub trait SentimentScorer: Send + Sync {
    /// Signed score; positive means more positive sentiment.
    fn score(&self, text: &str) -> i32;
}

/// AFINN-style lexicon scorer: sums per-word valences (-5..=5). A negator
/// right before a scored word flips that word's sign.
pub struct LexiconScorer {
    words: HashMap<&'static str, i32>,
}

const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt",
    "isn't", "wasnt", "wasn't", "cant", "can't", "cannot", "wont", "won't", "aint", "ain't",
];

// AFINN-165 word list, one `word<TAB>valence` per line.
const AFINN_165: &str = include_str!("afinn-165.txt");

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: AFINN_165
                .lines()
                .filter_map(|line| {
                    let (word, valence) = line.rsplit_once('\t')?;
                    Some((word, valence.trim().parse().ok()?))
                })
                .collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> i32 {
        let lowered = text.to_lowercase();
        let mut total = 0;
        let mut negate_next = false;

        for token in lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
        {
            if NEGATORS.contains(&token) {
                negate_next = true;
                continue;
            }
            if let Some(&valence) = self.words.get(token) {
                total += if negate_next { -valence } else { valence };
            }
            negate_next = false;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_word_valences() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("good"), 3);
        assert_eq!(scorer.score("Good day, great walk!"), 6);
        assert_eq!(scorer.score("bad and sad"), -5);
    }

    #[test]
    fn test_unknown_words_score_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("Today I started my project."), 0);
        assert_eq!(scorer.score(""), 0);
    }

    #[test]
    fn test_word_list_fully_loaded() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.words.len(), AFINN_165.lines().count());
        assert!(scorer.words.len() > 2000);
        assert!(scorer.words.values().all(|v| (-5..=5).contains(v) && *v != 0));
    }

    #[test]
    fn test_scores_match_afinn() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("I feel hopeless and lonely"), -4);
        assert_eq!(scorer.score("Feeling blessed today"), 2);
        assert_eq!(scorer.score("Yay, finally got the job"), 2);
        assert_eq!(scorer.score("breathtaking"), 5);
        assert_eq!(scorer.score("catastrophic"), -4);
    }

    #[test]
    fn test_negator_flips_following_word() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("not good"), -3);
        assert_eq!(scorer.score("I don't hate it"), 3);
        // Negation only reaches the next token
        assert_eq!(scorer.score("not today, happy"), 3);
    }
}
