//! Per-evaluator confusion counters.

use serde::{Deserialize, Serialize};

/// 2x2 confusion counts for one evaluator.
///
/// "Positive" means the evaluator judged the item correct; "true" means the
/// judgement matched the verified outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionProfile {
    pub true_positive: u64,
    pub false_negative: u64,
    pub true_negative: u64,
    pub false_positive: u64,
}

impl ConfusionProfile {
    /// Count one verified evaluation.
    pub fn record(&mut self, reported: bool, actual: bool) {
        let counter = match (reported, actual) {
            (true, true) => &mut self.true_positive,
            (false, true) => &mut self.false_negative,
            (false, false) => &mut self.true_negative,
            (true, false) => &mut self.false_positive,
        };
        *counter = counter.saturating_add(1);
    }

    /// Sum of all four counters, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.true_positive
            .saturating_add(self.false_negative)
            .saturating_add(self.true_negative)
            .saturating_add(self.false_positive)
    }

    /// Posterior probability that the item is correct given the evaluator
    /// reported `reported`.
    pub fn posterior(&self, reported: bool, smoothing: f64, prior_correct: f64) -> f64 {
        let tp = self.true_positive as f64 + smoothing;
        let fn_ = self.false_negative as f64 + smoothing;
        let tn = self.true_negative as f64 + smoothing;
        let fp = self.false_positive as f64 + smoothing;

        // Likelihood of the report under each hypothesis.
        let (given_correct, given_incorrect) = if reported {
            (tp / (tp + fn_), fp / (fp + tn))
        } else {
            (fn_ / (tp + fn_), tn / (fp + tn))
        };

        let num = given_correct * prior_correct;
        let den = num + given_incorrect * (1.0 - prior_correct);
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let p = ConfusionProfile {
            true_positive: u64::MAX,
            false_negative: 1,
            true_negative: 2,
            false_positive: 3,
        };
        assert_eq!(p.total(), u64::MAX);
    }

    #[test]
    fn record_increments_exactly_one_counter() {
        let mut p = ConfusionProfile::default();
        p.record(true, true);
        p.record(false, true);
        p.record(false, true);
        p.record(false, false);
        p.record(true, false);
        assert_eq!(
            p,
            ConfusionProfile {
                true_positive: 1,
                false_negative: 2,
                true_negative: 1,
                false_positive: 1,
            }
        );
        assert_eq!(p.total(), 5);
    }

    #[test]
    fn empty_profile_posterior_is_half() {
        let p = ConfusionProfile::default();
        assert!((p.posterior(true, 1.0, 0.5) - 0.5).abs() < 1e-12);
        assert!((p.posterior(false, 1.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_true_positive() {
        let mut p = ConfusionProfile::default();
        p.record(true, true);
        // TP=2 FN=1 TN=1 FP=1 after smoothing: (2/3) / (2/3 + 1/2) = 4/7
        assert!((p.posterior(true, 1.0, 0.5) - 4.0 / 7.0).abs() < 1e-12);
        // (1/3) / (1/3 + 1/2) = 2/5
        assert!((p.posterior(false, 1.0, 0.5) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn prior_shifts_posterior() {
        let p = ConfusionProfile::default();
        assert!((p.posterior(true, 1.0, 0.8) - 0.8).abs() < 1e-12);
    }
}
