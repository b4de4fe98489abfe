use crate::core::{JobPosting, ScoreBreakdown};
use crate::ranking::{sort_by_final, Page, Ranker, Window};

/// Orders by final score; equal scores keep their input order
pub struct FinalScoreRanker;

impl FinalScoreRanker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FinalScoreRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker for FinalScoreRanker {
    fn rank(&self, mut items: Vec<(JobPosting, ScoreBreakdown)>, window: Window) -> Page {
        sort_by_final(&mut items);
        Page::from_ordered(items, window)
    }

    fn name(&self) -> &str {
        "final-score"
    }
}
