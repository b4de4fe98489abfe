use crate::core::{clamp_unit, RuleScores, ScoreBreakdown};
use crate::scoring::Weights;

/// Weighted combination of rule components and the optional embedding score
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: Weights,
    rule_only: Weights,
}

impl ScoreAggregator {
    pub fn new(weights: Weights) -> Self {
        Self {
            rule_only: weights.without_embedding(),
            weights,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Combine into a breakdown.
    ///
    /// Without an embedding score the embedding weight is spread over the
    /// rule weights and the reported embedding component is `0.0`.
    pub fn aggregate(&self, rules: RuleScores, embedding: Option<f64>) -> ScoreBreakdown {
        let rules = rules.clamped();
        let embedding = embedding.filter(|e| e.is_finite()).map(clamp_unit);

        let raw_final = match embedding {
            Some(similarity) => {
                self.weights.apply_rules(&rules) + self.weights.embedding * similarity
            }
            None => self.rule_only.apply_rules(&rules),
        };

        ScoreBreakdown {
            skills: rules.skills,
            location: rules.location,
            work_mode: rules.work_mode,
            remuneration: rules.remuneration,
            embedding: embedding.unwrap_or(0.0),
            final_score: clamp_unit(raw_final),
            embedding_available: embedding.is_some(),
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}
