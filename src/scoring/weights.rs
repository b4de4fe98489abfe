use serde::{Deserialize, Serialize};

use crate::core::RuleScores;
use crate::error::{EngineError, Result};

/// Default weight table.
/// Skills dominate, the embedding is the second strongest signal and the
/// three preference criteria share the rest evenly.
pub const DEFAULT_WEIGHTS: Weights = Weights {
    skills: 0.30,
    location: 0.15,
    work_mode: 0.15,
    remuneration: 0.15,
    embedding: 0.25,
};

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub skills: f64,
    pub location: f64,
    pub work_mode: f64,
    pub remuneration: f64,
    pub embedding: f64,
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.rule_sum() + self.embedding
    }

    /// Sum of the four rule weights
    pub fn rule_sum(&self) -> f64 {
        self.skills + self.location + self.work_mode + self.remuneration
    }

    /// Rule-only table: the embedding weight spread over the rule weights in
    /// proportion to their size, so the result still sums to 1.
    pub fn without_embedding(&self) -> Weights {
        let rule_sum = self.rule_sum();
        if rule_sum <= 0.0 {
            return *self;
        }
        Weights {
            skills: self.skills / rule_sum,
            location: self.location / rule_sum,
            work_mode: self.work_mode / rule_sum,
            remuneration: self.remuneration / rule_sum,
            embedding: 0.0,
        }
    }

    /// Weighted sum of the rule components only
    pub fn apply_rules(&self, rules: &RuleScores) -> f64 {
        self.skills * rules.skills
            + self.location * rules.location
            + self.work_mode * rules.work_mode
            + self.remuneration * rules.remuneration
    }

    pub fn validate(&self) -> Result<()> {
        let all = [self.skills, self.location, self.work_mode, self.remuneration, self.embedding];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "weights must be finite and non-negative".into(),
            ));
        }
        if (self.sum() - 1.0).abs() > SUM_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "weights must sum to 1.0, got {:.6}",
                self.sum()
            )));
        }
        if self.rule_sum() <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "at least one rule weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-9);
        assert!(DEFAULT_WEIGHTS.validate().is_ok());
    }

    #[test]
    fn redistribution_is_proportional() {
        let w = DEFAULT_WEIGHTS.without_embedding();
        assert!((w.sum() - 1.0).abs() < 1e-9);
        assert!((w.skills - 0.40).abs() < 1e-9);
        assert!((w.location - 0.20).abs() < 1e-9);
        assert!((w.work_mode - 0.20).abs() < 1e-9);
        assert!((w.remuneration - 0.20).abs() < 1e-9);
        assert_eq!(w.embedding, 0.0);
    }

    #[test]
    fn rejects_bad_tables() {
        let mut w = DEFAULT_WEIGHTS;
        w.skills = 0.5;
        assert!(w.validate().is_err());

        let negative = Weights {
            skills: 1.2,
            location: -0.2,
            ..Weights::default()
        };
        assert!(negative.validate().is_err());

        let embedding_only = Weights {
            skills: 0.0,
            location: 0.0,
            work_mode: 0.0,
            remuneration: 0.0,
            embedding: 1.0,
        };
        assert!(embedding_only.validate().is_err());
    }
}
