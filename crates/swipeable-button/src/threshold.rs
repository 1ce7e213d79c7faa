//! Commit/cancel decision shared by the release and live-crossing paths.

use crate::travel::TravelRange;

/// Fraction of the travel range a drag must cover to commit.
pub const THRESHOLD_RATIO: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    Commit,
    Cancel,
}

impl CommitDecision {
    pub fn is_commit(self) -> bool {
        self == CommitDecision::Commit
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    /// `Commit` iff the range is non-degenerate and `offset >= 0.9 * range`.
    ///
    /// The bound is inclusive. Both commit paths go through this function so
    /// they can never disagree about where the boundary lies.
    pub fn decide(offset: f32, range: TravelRange) -> CommitDecision {
        if !range.is_degenerate() && offset >= THRESHOLD_RATIO * range.length() {
            CommitDecision::Commit
        } else {
            CommitDecision::Cancel
        }
    }
}
