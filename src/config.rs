//! Engine configuration.
//!
//! Every section has defaults, so a config file only needs the keys it
//! changes. Files are JSON or YAML depending on their extension; environment
//! variables override individual knobs after the file is read.
//!
//! ```
//! use jobmatch_engine::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{"scoring": {"expected_skill_count": 3}}"#).unwrap();
//! assert_eq!(config.scoring.expected_skill_count, 3);
//! assert_eq!(config.weights.skills, 0.30);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::scoring::Weights;

pub const ENV_EXPECTED_SKILL_COUNT: &str = "JOBMATCH_EXPECTED_SKILL_COUNT";
pub const ENV_WORKER_THREADS: &str = "JOBMATCH_WORKER_THREADS";
pub const ENV_RERANK_TOP_K: &str = "JOBMATCH_RERANK_TOP_K";

/// Rule scoring constants.
///
/// Exact matches always score 1.0 and misses 0.0; the partial credits must
/// stay strictly between the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Number of overlapping skills that saturates the skills component
    pub expected_skill_count: usize,

    /// Score for a criterion that cannot be evaluated
    pub neutral_score: f64,

    /// Location substring match
    pub location_partial_credit: f64,

    /// Hybrid against remote/on-site
    pub work_mode_partial_credit: f64,

    /// Compensation described in text only
    pub remuneration_text_credit: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            expected_skill_count: 5,
            neutral_score: 0.5,
            location_partial_credit: 0.5,
            work_mode_partial_credit: 0.5,
            remuneration_text_credit: 0.5,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.expected_skill_count == 0 {
            return Err(EngineError::InvalidConfig(
                "expected_skill_count must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.neutral_score) {
            return Err(EngineError::InvalidConfig(format!(
                "neutral_score must be within [0, 1], got {}",
                self.neutral_score
            )));
        }
        for (name, credit) in [
            ("location_partial_credit", self.location_partial_credit),
            ("work_mode_partial_credit", self.work_mode_partial_credit),
            ("remuneration_text_credit", self.remuneration_text_credit),
        ] {
            if !(credit > 0.0 && credit < 1.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be strictly between 0 and 1, got {}",
                    name, credit
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Reorder the best `k` results by the upstream rerank score
    pub rerank_top_k: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub weights: Weights,
    pub ranking: RankingConfig,

    /// Size of a dedicated scoring pool; `None` uses rayon's global pool
    pub worker_threads: Option<usize>,
}

impl EngineConfig {
    /// Read a JSON (`.json`) or YAML (`.yaml`/`.yml`) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Defaults or file, then environment overrides, then validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override knobs from `JOBMATCH_*` variables. Unparseable values are
    /// logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(count) = env_usize(ENV_EXPECTED_SKILL_COUNT) {
            self.scoring.expected_skill_count = count;
        }
        if let Some(threads) = env_usize(ENV_WORKER_THREADS) {
            self.worker_threads = Some(threads);
        }
        if let Some(top_k) = env_usize(ENV_RERANK_TOP_K) {
            self.ranking.rerank_top_k = Some(top_k);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.weights.validate()?;
        if self.worker_threads == Some(0) {
            return Err(EngineError::InvalidConfig(
                "worker_threads must be at least 1".into(),
            ));
        }
        if self.ranking.rerank_top_k == Some(0) {
            return Err(EngineError::InvalidConfig(
                "rerank_top_k must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "weights=[skills={}, location={}, work_mode={}, remuneration={}, embedding={}], \
             expected_skill_count={}, neutral={}, workers={}, rerank_top_k={}",
            self.weights.skills,
            self.weights.location,
            self.weights.work_mode,
            self.weights.remuneration,
            self.weights.embedding,
            self.scoring.expected_skill_count,
            self.scoring.neutral_score,
            self.worker_threads
                .map(|n| n.to_string())
                .unwrap_or_else(|| "auto".to_string()),
            self.ranking
                .rerank_top_k
                .map(|k| k.to_string())
                .unwrap_or_else(|| "off".to_string()),
        )
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.scoring.expected_skill_count, 5);
        assert_eq!(config.scoring.neutral_score, 0.5);
        assert_eq!(config.weights, crate::scoring::DEFAULT_WEIGHTS);
        assert_eq!(config.worker_threads, None);
        assert_eq!(config.ranking.rerank_top_k, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "scoring:\n  location_partial_credit: 0.4\nranking:\n  rerank_top_k: 15\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.location_partial_credit, 0.4);
        assert_eq!(config.scoring.expected_skill_count, 5);
        assert_eq!(config.ranking.rerank_top_k, Some(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("jobmatch-config-{}.yml", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "worker_threads: 2").unwrap();
            writeln!(file, "weights:").unwrap();
            writeln!(file, "  skills: 0.4").unwrap();
            writeln!(file, "  embedding: 0.15").unwrap();
        }

        let config = EngineConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.worker_threads, Some(2));
        assert_eq!(config.weights.skills, 0.4);
        assert_eq!(config.weights.location, 0.15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_order_credits() {
        let mut config = EngineConfig::default();
        config.scoring.location_partial_credit = 1.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.scoring.expected_skill_count = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.worker_threads = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display() {
        let text = EngineConfig::default().to_string();
        assert!(text.contains("skills=0.3"));
        assert!(text.contains("workers=auto"));
        assert!(text.contains("rerank_top_k=off"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
