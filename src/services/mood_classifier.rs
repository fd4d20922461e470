use std::sync::Arc;

use super::sentiment::SentimentScorer;
use crate::models::mood::MoodLabel;

/// Texts shorter than this (after trimming) are too short to score.
const MIN_SCORABLE_CHARS: usize = 3;

/// Suggests a mood for free text from its sentiment score.
#[derive(Clone)]
pub struct MoodClassifier {
    scorer: Arc<dyn SentimentScorer>,
}

impl MoodClassifier {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, text: &str) -> MoodLabel {
        if text.trim().chars().count() < MIN_SCORABLE_CHARS {
            return MoodLabel::Neutral;
        }
        mood_for_score(self.scorer.score(text))
    }
}

/// Score bands:
/// - `>= 4` Excited
/// - `2..4` Happy
/// - `0..2` Neutral
/// - `-3..=-1` Sad
/// - `<= -4` Angry
pub fn mood_for_score(score: i32) -> MoodLabel {
    match score {
        s if s >= 4 => MoodLabel::Excited,
        2..=3 => MoodLabel::Happy,
        0..=1 => MoodLabel::Neutral,
        -3..=-1 => MoodLabel::Sad,
        _ => MoodLabel::Angry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sentiment::LexiconScorer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed score and counts how often it was asked.
    struct FixedScorer {
        score: i32,
        calls: AtomicUsize,
    }

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> i32 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.score
        }
    }

    fn fixed(score: i32) -> Arc<FixedScorer> {
        Arc::new(FixedScorer {
            score,
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(mood_for_score(10), MoodLabel::Excited);
        assert_eq!(mood_for_score(4), MoodLabel::Excited);
        assert_eq!(mood_for_score(3), MoodLabel::Happy);
        assert_eq!(mood_for_score(2), MoodLabel::Happy);
        assert_eq!(mood_for_score(1), MoodLabel::Neutral);
        assert_eq!(mood_for_score(0), MoodLabel::Neutral);
        assert_eq!(mood_for_score(-1), MoodLabel::Sad);
        assert_eq!(mood_for_score(-3), MoodLabel::Sad);
        assert_eq!(mood_for_score(-4), MoodLabel::Angry);
        assert_eq!(mood_for_score(-12), MoodLabel::Angry);
    }

    #[test]
    fn test_short_text_skips_scorer() {
        let scorer = fixed(5);
        let classifier = MoodClassifier::new(scorer.clone());

        assert_eq!(classifier.classify(""), MoodLabel::Neutral);
        assert_eq!(classifier.classify("hi"), MoodLabel::Neutral);
        assert_eq!(classifier.classify("  ok  "), MoodLabel::Neutral);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);

        assert_eq!(classifier.classify("hey"), MoodLabel::Excited);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = MoodClassifier::new(Arc::new(LexiconScorer::new()));
        let text = "Had a great walk in the park, but work was stressful.";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
    }

    #[test]
    fn test_classify_with_lexicon() {
        let classifier = MoodClassifier::new(Arc::new(LexiconScorer::new()));
        assert_eq!(
            classifier.classify("What an amazing, wonderful day!"),
            MoodLabel::Excited
        );
        assert_eq!(classifier.classify("Had a good lunch."), MoodLabel::Happy);
        assert_eq!(classifier.classify("Today i started my project."), MoodLabel::Neutral);
        assert_eq!(classifier.classify("Felt sad today."), MoodLabel::Sad);
        assert_eq!(
            classifier.classify("Awful, terrible, horrible day."),
            MoodLabel::Angry
        );
        assert_eq!(classifier.classify("I feel hopeless and lonely"), MoodLabel::Angry);
        assert_eq!(classifier.classify("Feeling blessed today"), MoodLabel::Happy);
        assert_eq!(classifier.classify("Yay, finally got the job"), MoodLabel::Happy);
    }
}
