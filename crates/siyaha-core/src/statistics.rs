//! Display statistics derived from a quiz result.
//!
//! Everything here is a pure function of a [`QuizResult`]; rendering the same
//! result twice always shows the same numbers.

use serde::{Deserialize, Serialize};

use crate::report::QuizResult;

/// Default percentage at or above which a result counts as a pass.
pub const DEFAULT_PASS_MARK: u32 = 50;

/// Rounded percentage of `score` out of `total`, in `0..=100`.
///
/// Halves round up, so 1/2 is 50 and 2/3 is 67. A zero total yields 0.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    // round(100 * score / total) in integer arithmetic
    ((200 * score + total) / (2 * total)) as u32
}

/// Statistics shown on the results screen and in exported reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStats {
    pub score: u32,
    pub total: u32,
    pub incorrect: u32,
    /// Percentage of correct answers.
    pub percentage: u32,
    /// `100 - percentage`, as shown next to the incorrect count.
    pub incorrect_percentage: u32,
}

impl ResultStats {
    pub fn from_result(result: &QuizResult) -> Self {
        let percentage = percentage(result.score, result.total);
        Self {
            score: result.score,
            total: result.total,
            incorrect: result.total.saturating_sub(result.score),
            percentage,
            incorrect_percentage: 100 - percentage,
        }
    }

    /// Whether the result reaches `pass_mark` percent.
    pub fn passed(&self, pass_mark: u32) -> bool {
        self.percentage >= pass_mark
    }
}
