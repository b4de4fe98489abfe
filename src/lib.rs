//! # JobMatch Engine
//!
//! Relevance scoring and ranking of job postings for a user profile:
//! - Four rule-based criteria (skills, location, work mode, remuneration)
//! - Optional upstream embedding similarity, weight redistributed when absent
//! - Parallel batch scoring with rayon, stable final-score ranking, pagination
//! - Optional top-k rerank by an upstream cross-encoder score
//! - Multiple interfaces: Rust library, Python bindings, CLI
//!
//! ## Example Usage
//!
//! ```rust
//! use jobmatch_engine::{rank_jobs, JobPosting, UserProfile};
//!
//! let profile = UserProfile {
//!     skills: ["python".to_string(), "sql".to_string()].into_iter().collect(),
//!     location: Some("casablanca".to_string()),
//!     ..UserProfile::default()
//! };
//!
//! let mut job = JobPosting::new("42", "Data Engineer", "Acme");
//! job.required_skills = ["python".to_string(), "docker".to_string()].into_iter().collect();
//! job.location = Some("casablanca, morocco".to_string());
//!
//! let page = rank_jobs(&profile, vec![job], 0, 10);
//! assert_eq!(page.total, 1);
//! println!("{}", page.items[0].score.unwrap().display());
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod ranking;
pub mod scoring;

use std::sync::OnceLock;

// Re-export primary types
pub use config::{EngineConfig, RankingConfig, ScoringConfig};
pub use crate::core::{JobPosting, RawJob, RawProfile, RuleScores, ScoreBreakdown, UserProfile, WorkMode};
pub use engine::MatchEngine;
pub use error::{EngineError, Result};
pub use ranking::{sort_by_recency, Page, RankedJob, Ranker, Window};
pub use scoring::{Weights, DEFAULT_WEIGHTS};

// Python bindings
#[cfg(feature = "python")]
pub mod python;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_engine() -> &'static MatchEngine {
    static ENGINE: OnceLock<MatchEngine> = OnceLock::new();
    ENGINE.get_or_init(MatchEngine::default)
}

/// Score one job with the default configuration
pub fn score_job(profile: &UserProfile, job: &JobPosting) -> ScoreBreakdown {
    default_engine().score_job(profile, job)
}

/// Score and rank a batch with the default configuration
pub fn rank_jobs(profile: &UserProfile, jobs: Vec<JobPosting>, skip: usize, limit: usize) -> Page {
    default_engine().rank_jobs(profile, jobs, Window::new(skip, limit))
}
