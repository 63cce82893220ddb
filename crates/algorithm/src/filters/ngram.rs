use std::collections::HashSet;

use crate::capability::{FilterAlgorithm, FilterDecision};
use crate::params::Params;

/// `1 - distinct / total` over word n-grams. Returns `None` when the text has
/// fewer than `n` words. `n` below 1 is treated as 1.
pub fn repetition_ratio(text: &str, n: usize) -> Option<f64> {
    let n = n.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < n {
        return None;
    }
    let total = words.len() - n + 1;
    let distinct: HashSet<&[&str]> = words.windows(n).collect();
    Some(1.0 - distinct.len() as f64 / total as f64)
}

/// Drops text dominated by repeated word n-grams.
#[derive(Debug, Clone)]
pub struct NGramFilter {
    default_n: usize,
    default_threshold: f64,
}

impl NGramFilter {
    pub const NAME: &'static str = "ngram";

    pub fn new(default_n: usize, default_threshold: f64) -> Self {
        Self {
            default_n,
            default_threshold,
        }
    }
}

impl Default for NGramFilter {
    fn default() -> Self {
        Self::new(3, 0.5)
    }
}

impl FilterAlgorithm for NGramFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, text: &str, params: &Params) -> FilterDecision {
        let n = params.usize("ngram_n").unwrap_or(self.default_n);
        let threshold = params
            .f64("ngram_threshold")
            .unwrap_or(self.default_threshold);

        match repetition_ratio(text, n) {
            Some(ratio) if ratio > threshold => {
                FilterDecision::drop(format!("ngram rep ratio {ratio:.6} > {threshold:.6}"))
            }
            _ => FilterDecision::keep("ok"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes() {
        assert_eq!(repetition_ratio("two words", 3), None);
        assert!(NGramFilter::default().evaluate("two words", &Params::new()).keep);
    }

    #[test]
    fn unique_trigrams_have_zero_ratio() {
        assert_eq!(repetition_ratio("one two three four five", 3), Some(0.0));
    }

    #[test]
    fn looping_text_is_dropped() {
        // 7 trigrams, 3 distinct.
        let text = "a b c a b c a b c";
        let ratio = repetition_ratio(text, 3).unwrap();
        assert!((ratio - (1.0 - 3.0 / 7.0)).abs() < 1e-12);

        let decision = NGramFilter::default().evaluate(text, &Params::new());
        assert!(!decision.keep);
        assert_eq!(decision.reason, "ngram rep ratio 0.571429 > 0.500000");
    }

    #[test]
    fn params_change_window_and_threshold() {
        let text = "a b c a b c a b c";
        let lenient = Params::new().with("ngram_threshold", 0.9);
        assert!(NGramFilter::default().evaluate(text, &lenient).keep);

        // With n = 9 there is a single window, so no repetition.
        let wide = Params::new().with("ngram_n", 9);
        assert!(NGramFilter::default().evaluate(text, &wide).keep);
    }

    #[test]
    fn zero_window_is_clamped() {
        assert_eq!(repetition_ratio("x x", 0), Some(0.5));
    }
}
