use crate::capability::{FilterAlgorithm, FilterDecision};
use crate::params::Params;

const VOWELS: &str = "aeiouy";

/// Vowel-group syllable estimate. A trailing `e` is treated as silent; every
/// word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count: isize = 0;
    let mut prev_vowel = false;
    for ch in word.chars() {
        let is_vowel = VOWELS.contains(ch);
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }
    if word.ends_with('e') {
        count -= 1;
    }
    count.max(1) as usize
}

/// Gunning fog index: `0.4 * (words / sentences + 100 * complex / words)`.
///
/// Sentences are the pieces of `text` split on `.`, so a trailing period
/// adds an empty piece. Complex words have three or more syllables.
/// Returns `None` for text without words.
pub fn fog_index(text: &str) -> Option<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    let sentences = text.split('.').count();
    let complex = words.iter().filter(|w| count_syllables(w) >= 3).count();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let percent_complex = complex as f64 / words.len() as f64 * 100.0;
    Some(0.4 * (words_per_sentence + percent_complex))
}

/// Drops text that reads too simply (fog index below `min_fog_index`).
#[derive(Debug, Clone)]
pub struct ReadabilityFilter {
    default_min_fog: f64,
}

impl ReadabilityFilter {
    pub const NAME: &'static str = "readability_fog";

    pub fn new(default_min_fog: f64) -> Self {
        Self { default_min_fog }
    }
}

impl Default for ReadabilityFilter {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl FilterAlgorithm for ReadabilityFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, text: &str, params: &Params) -> FilterDecision {
        let min_fog = params.f64("min_fog_index").unwrap_or(self.default_min_fog);
        match fog_index(text) {
            None => FilterDecision::drop("empty text"),
            Some(fog) if fog < min_fog => {
                FilterDecision::drop(format!("fog index {fog:.6} < threshold {min_fog:.6}"))
            }
            Some(_) => FilterDecision::keep("ok"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("cake"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("Documentation"), 5);
        assert_eq!(count_syllables("necessitate"), 4);
    }

    #[test]
    fn empty_text_is_dropped() {
        let decision = ReadabilityFilter::default().evaluate("   ", &Params::new());
        assert!(!decision.keep);
        assert_eq!(decision.reason, "empty text");
    }

    #[test]
    fn trailing_period_counts_an_empty_sentence() {
        // 3 words over 2 pieces, no complex words.
        let fog = fog_index("The cat sat.").unwrap();
        assert!((fog - 0.6).abs() < 1e-12);
    }

    #[test]
    fn simple_text_is_dropped() {
        let decision = ReadabilityFilter::default().evaluate("The cat sat.", &Params::new());
        assert!(!decision.keep);
        assert_eq!(decision.reason, "fog index 0.600000 < threshold 6.000000");
    }

    #[test]
    fn dense_text_passes() {
        let text = "Organizational responsibilities necessitate comprehensive documentation";
        // 5 words, 1 sentence, 5 complex words: 0.4 * (5 + 100).
        assert!((fog_index(text).unwrap() - 42.0).abs() < 1e-9);
        assert!(ReadabilityFilter::default().evaluate(text, &Params::new()).keep);
    }

    #[test]
    fn param_lowers_the_bar() {
        let params = Params::new().with("min_fog_index", 0.5);
        assert!(ReadabilityFilter::default().evaluate("The cat sat.", &params).keep);
    }
}
