use std::cmp::Ordering;

use crate::core::{JobPosting, ScoreBreakdown};
use crate::ranking::{sort_by_final, Page, Ranker, Window};

/// Final-score ordering, then the best `top_k` reordered by the upstream
/// cross-encoder `rerank_score`.
///
/// Jobs without a rerank score go after the scored ones within the head;
/// everything past `top_k` keeps final-score order.
pub struct TopKReranker {
    top_k: usize,
}

impl TopKReranker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

impl Ranker for TopKReranker {
    fn rank(&self, mut items: Vec<(JobPosting, ScoreBreakdown)>, window: Window) -> Page {
        sort_by_final(&mut items);

        let head = self.top_k.min(items.len());
        items[..head].sort_by(|a, b| match (a.0.rerank_score, b.0.rerank_score) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        tracing::debug!(top_k = self.top_k, reranked = head, "rerank applied");
        Page::from_ordered(items, window)
    }

    fn name(&self) -> &str {
        "top-k-rerank"
    }
}
