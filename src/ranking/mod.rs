pub mod final_score;
pub mod rerank;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::{JobPosting, ScoreBreakdown};

pub use final_score::FinalScoreRanker;
pub use rerank::TopKReranker;

/// Trait for ordering scored jobs into a page
pub trait Ranker: Send + Sync {
    /// Order `items` best first and cut the requested window
    fn rank(&self, items: Vec<(JobPosting, ScoreBreakdown)>, window: Window) -> Page;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub skip: usize,
    pub limit: usize,
}

impl Window {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Every item
    pub fn all() -> Self {
        Self::new(0, usize::MAX)
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::all()
    }
}

/// A job with its score, `None` when no profile was available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    pub job: JobPosting,
    pub score: Option<ScoreBreakdown>,
}

impl RankedJob {
    pub fn new(job: JobPosting, score: Option<ScoreBreakdown>) -> Self {
        Self { job, score }
    }

    /// Final score, `0.0` when unscored
    pub fn final_score(&self) -> f64 {
        self.score.map(|s| s.final_score).unwrap_or(0.0)
    }
}

/// One window of a ranked batch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<RankedJob>,

    /// Batch size before windowing
    pub total: usize,

    /// Jobs that failed normalization and were ranked with the worst-case score
    #[serde(default)]
    pub failed: usize,
}

impl Page {
    /// Window already-ordered items
    pub fn from_ordered(items: Vec<(JobPosting, ScoreBreakdown)>, window: Window) -> Self {
        let total = items.len();
        let items = window
            .apply(items)
            .into_iter()
            .map(|(job, score)| RankedJob::new(job, Some(score)))
            .collect();
        Self {
            items,
            total,
            failed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Stable sort by final score, highest first
pub(crate) fn sort_by_final(items: &mut [(JobPosting, ScoreBreakdown)]) {
    items.sort_by(|a, b| {
        b.1.final_score
            .partial_cmp(&a.1.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// Newest `posted_at` first, undated jobs last, otherwise input order.
///
/// Running this before a ranker makes recency the tie-break between equal
/// final scores.
pub fn sort_by_recency(jobs: &mut [JobPosting]) {
    jobs.sort_by(|a, b| match (a.posted_at, b.posted_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
