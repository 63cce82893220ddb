use std::collections::HashMap;

use crate::capability::{FilterAlgorithm, FilterDecision};
use crate::params::Params;

/// Shannon entropy (bits) of the character distribution of `text`.
/// Empty text has entropy 0.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for ch in text.chars() {
        *counts.entry(ch).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .values()
        .map(|&c| {
            let c = c as f64;
            (c / total) * (total / c).log2()
        })
        .sum()
}

/// Drops text whose character entropy is below `entropy_threshold`.
#[derive(Debug, Clone)]
pub struct EntropyFilter {
    default_threshold: f64,
}

impl EntropyFilter {
    pub const NAME: &'static str = "entropy";
    pub const PARAM: &'static str = "entropy_threshold";

    pub fn new(default_threshold: f64) -> Self {
        Self { default_threshold }
    }
}

impl Default for EntropyFilter {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl FilterAlgorithm for EntropyFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, text: &str, params: &Params) -> FilterDecision {
        let threshold = params.f64(Self::PARAM).unwrap_or(self.default_threshold);
        let entropy = shannon_entropy(text);
        if entropy < threshold {
            FilterDecision::drop(format!("entropy {entropy:.6} < {threshold:.6}"))
        } else {
            FilterDecision::keep("ok")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_values() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);
        assert!((shannon_entropy("aabb") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn repetitive_text_is_dropped() {
        let decision = EntropyFilter::default().evaluate("aaaaaaaa", &Params::new());
        assert!(!decision.keep);
        assert_eq!(decision.reason, "entropy 0.000000 < 2.000000");
    }

    #[test]
    fn threshold_is_inclusive() {
        // Exactly 2 bits passes the default threshold of 2.0.
        assert!(EntropyFilter::default().evaluate("abcd", &Params::new()).keep);
    }

    #[test]
    fn param_overrides_default() {
        let params = Params::new().with("entropy_threshold", 0.5);
        assert!(EntropyFilter::default().evaluate("aabb", &params).keep);
        let params = Params::new().with("entropy_threshold", 4.5);
        assert!(!EntropyFilter::default()
            .evaluate("The quick brown fox jumps", &params)
            .keep);
    }
}
