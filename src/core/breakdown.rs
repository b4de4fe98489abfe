use serde::{Deserialize, Serialize};

/// Clamp a score into `[0, 1]`; non-finite values become `0.0`.
pub fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// The four rule-based sub-scores, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleScores {
    pub skills: f64,
    pub location: f64,
    pub work_mode: f64,
    pub remuneration: f64,
}

impl RuleScores {
    /// All components at zero (used for jobs that failed normalization)
    pub const ZERO: RuleScores = RuleScores {
        skills: 0.0,
        location: 0.0,
        work_mode: 0.0,
        remuneration: 0.0,
    };

    /// Copy with every component clamped into `[0, 1]`
    pub fn clamped(self) -> Self {
        Self {
            skills: clamp_unit(self.skills),
            location: clamp_unit(self.location),
            work_mode: clamp_unit(self.work_mode),
            remuneration: clamp_unit(self.remuneration),
        }
    }
}

/// Per-(profile, job) score detail.
///
/// Serialized as a flat object:
/// `{"skills", "location", "work_mode", "remuneration", "embedding", "final", "embedding_available"}`.
/// `embedding` is `0.0` when the upstream similarity was not available, in
/// which case its weight was redistributed over the rule components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub location: f64,
    pub work_mode: f64,
    pub remuneration: f64,
    pub embedding: f64,

    /// Weighted combination, the ranking key
    #[serde(rename = "final")]
    pub final_score: f64,

    #[serde(default)]
    pub embedding_available: bool,
}

impl ScoreBreakdown {
    /// Worst possible breakdown: every rule at zero, no embedding, final zero
    pub fn worst_case() -> Self {
        Self {
            skills: 0.0,
            location: 0.0,
            work_mode: 0.0,
            remuneration: 0.0,
            embedding: 0.0,
            final_score: 0.0,
            embedding_available: false,
        }
    }

    /// Rule components only
    pub fn rule_scores(&self) -> RuleScores {
        RuleScores {
            skills: self.skills,
            location: self.location,
            work_mode: self.work_mode,
            remuneration: self.remuneration,
        }
    }

    /// Named components in serialization order (excluding `final`)
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("skills", self.skills),
            ("location", self.location),
            ("work_mode", self.work_mode),
            ("remuneration", self.remuneration),
            ("embedding", self.embedding),
        ]
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "final={:.3} skills={:.2} location={:.2} work_mode={:.2} remuneration={:.2} embedding={}",
            self.final_score,
            self.skills,
            self.location,
            self.work_mode,
            self.remuneration,
            if self.embedding_available {
                format!("{:.2}", self.embedding)
            } else {
                "n/a".to_string()
            }
        )
    }
}
