use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::core::WorkMode;

/// Job attributes as supplied by the job store.
///
/// Field names follow the store schema; the French names used by the
/// enrichment pipeline are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub title: Value,

    #[serde(default)]
    pub company: Value,

    #[serde(default)]
    pub description: Value,

    #[serde(default, alias = "competences_techniques")]
    pub required_skills: Value,

    #[serde(default)]
    pub location: Value,

    #[serde(default, alias = "mode_travail")]
    pub work_mode: Value,

    #[serde(default)]
    pub salary_min: Value,

    #[serde(default)]
    pub salary_max: Value,

    #[serde(default)]
    pub currency: Value,

    #[serde(default, alias = "remuneration")]
    pub remuneration_text: Value,

    /// Precomputed semantic similarity in [0, 1]
    #[serde(default, alias = "score_embedding")]
    pub embedding_score: Value,

    /// Precomputed cross-encoder relevance, ordering only
    #[serde(default, alias = "score_cross_encoder")]
    pub rerank_score: Value,

    #[serde(default)]
    pub posted_at: Value,
}

impl RawJob {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a JSON array of jobs
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}

/// Canonical job posting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Unique ID from the job store
    pub id: String,

    /// Job title
    #[serde(default)]
    pub title: String,

    /// Hiring company
    #[serde(default)]
    pub company: String,

    /// Full description
    #[serde(default)]
    pub description: String,

    /// Required technical skills (lowercase)
    #[serde(default)]
    pub required_skills: BTreeSet<String>,

    /// Job location (lowercase)
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub work_mode: Option<WorkMode>,

    #[serde(default)]
    pub salary_min: Option<f64>,

    #[serde(default)]
    pub salary_max: Option<f64>,

    /// Salary currency (uppercase code)
    #[serde(default)]
    pub currency: Option<String>,

    /// Free-text compensation when no structured range exists
    #[serde(default)]
    pub remuneration_text: Option<String>,

    /// Semantic similarity with the profile, `None` when not computed upstream
    #[serde(default)]
    pub embedding_score: Option<f64>,

    /// Cross-encoder relevance, `None` when not computed upstream
    #[serde(default)]
    pub rerank_score: Option<f64>,

    /// Publication timestamp
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,

    /// Tokens of title + company + description, fallback matching surface
    #[serde(default, skip_serializing)]
    pub searchable_tokens: BTreeSet<String>,
}

impl JobPosting {
    /// Create a posting with the identity fields set and nothing else
    pub fn new(id: impl Into<String>, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    /// Whether a structured salary range is present
    pub fn has_salary_range(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }

    /// Upper bound of the range, falling back to the lower bound
    pub fn salary_ceiling(&self) -> Option<f64> {
        self.salary_max.or(self.salary_min)
    }

    /// Get display name (for logging)
    pub fn display_name(&self) -> String {
        if self.company.is_empty() {
            self.title.clone()
        } else {
            format!("{} @ {}", self.title, self.company)
        }
    }
}
