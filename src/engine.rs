use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::{JobPosting, RawJob, RawProfile, ScoreBreakdown, UserProfile};
use crate::error::Result;
use crate::normalize::{fields, JobNormalizer, ProfileNormalizer};
use crate::ranking::{FinalScoreRanker, Page, RankedJob, Ranker, TopKReranker, Window};
use crate::scoring::{RuleScorer, ScoreAggregator};

/// Main scoring and ranking orchestrator.
///
/// Stateless between calls: every batch is scored independently, so one
/// engine can be shared across threads behind an `Arc`.
pub struct MatchEngine {
    config: EngineConfig,
    profiles: ProfileNormalizer,
    jobs: JobNormalizer,
    scorer: RuleScorer,
    aggregator: ScoreAggregator,
    ranker: Box<dyn Ranker>,
    pool: Option<rayon::ThreadPool>,
}

impl MatchEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let pool = match config.worker_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("jobmatch-worker-{}", i))
                    .build()?,
            ),
            None => None,
        };

        let ranker: Box<dyn Ranker> = match config.ranking.rerank_top_k {
            Some(top_k) => Box::new(TopKReranker::new(top_k)),
            None => Box::new(FinalScoreRanker::new()),
        };

        tracing::info!(ranker = ranker.name(), "match engine ready: {}", config);

        Ok(Self {
            profiles: ProfileNormalizer::new(),
            jobs: JobNormalizer::new(),
            scorer: RuleScorer::new(config.scoring),
            aggregator: ScoreAggregator::new(config.weights),
            ranker,
            pool,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the active ranker
    pub fn ranker_name(&self) -> &str {
        self.ranker.name()
    }

    /// Normalize raw profile attributes (never fails)
    pub fn normalize_profile(&self, raw: &RawProfile) -> UserProfile {
        self.profiles.normalize(raw)
    }

    /// Normalize raw job attributes
    pub fn normalize_job(&self, raw: &RawJob) -> Result<JobPosting> {
        self.jobs.normalize(raw)
    }

    /// Score one job against one profile
    pub fn score_job(&self, profile: &UserProfile, job: &JobPosting) -> ScoreBreakdown {
        let rules = self.scorer.score(profile, job);
        self.aggregator.aggregate(rules, job.embedding_score)
    }

    /// Score every job in parallel, then rank and window
    pub fn rank_jobs(&self, profile: &UserProfile, jobs: Vec<JobPosting>, window: Window) -> Page {
        let start = Instant::now();
        let count = jobs.len();

        let scored: Vec<(JobPosting, ScoreBreakdown)> = self.install(|| {
            jobs.into_par_iter()
                .map(|job| {
                    let breakdown = self.score_job(profile, &job);
                    (job, breakdown)
                })
                .collect()
        });

        let page = self.ranker.rank(scored, window);
        tracing::debug!(
            profile_id = profile.display_id(),
            jobs = count,
            returned = page.len(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ranked batch"
        );
        page
    }

    /// Normalize and rank raw store records.
    ///
    /// A job that fails normalization does not fail the batch: it is ranked
    /// with the worst-case breakdown and counted in [`Page::failed`].
    pub fn rank_raw_jobs(&self, raw_profile: &RawProfile, raw_jobs: &[RawJob], window: Window) -> Page {
        let profile = self.normalize_profile(raw_profile);

        let results: Vec<(JobPosting, ScoreBreakdown, bool)> = self.install(|| {
            raw_jobs
                .par_iter()
                .map(|raw| match self.jobs.normalize(raw) {
                    Ok(job) => {
                        let breakdown = self.score_job(&profile, &job);
                        (job, breakdown, false)
                    }
                    Err(e) => {
                        let job = placeholder(raw);
                        tracing::warn!(job_id = %job.id, error = %e, "job failed normalization, ranked last");
                        (job, ScoreBreakdown::worst_case(), true)
                    }
                })
                .collect()
        });

        let failed = results.iter().filter(|(_, _, failed)| *failed).count();
        let scored = results
            .into_iter()
            .map(|(job, breakdown, _)| (job, breakdown))
            .collect();

        let mut page = self.ranker.rank(scored, window);
        page.failed = failed;
        if failed > 0 {
            tracing::info!(failed, total = page.total, "batch ranked with isolated failures");
        }
        page
    }

    /// Rank for a possibly anonymous viewer.
    ///
    /// Without a profile nothing is scored: every item carries `score: None`
    /// and input order is kept.
    pub fn rank_for_viewer(
        &self,
        profile: Option<&UserProfile>,
        jobs: Vec<JobPosting>,
        window: Window,
    ) -> Page {
        match profile {
            Some(profile) => self.rank_jobs(profile, jobs, window),
            None => {
                let total = jobs.len();
                let items = window
                    .apply(jobs)
                    .into_iter()
                    .map(|job| RankedJob::new(job, None))
                    .collect();
                Page {
                    items,
                    total,
                    failed: 0,
                }
            }
        }
    }

    /// [`rank_jobs`](Self::rank_jobs) on tokio's blocking pool
    pub async fn rank_jobs_async(
        self: Arc<Self>,
        profile: UserProfile,
        jobs: Vec<JobPosting>,
        window: Window,
    ) -> Result<Page> {
        let page = tokio::task::spawn_blocking(move || self.rank_jobs(&profile, jobs, window)).await?;
        Ok(page)
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            profiles: ProfileNormalizer::new(),
            jobs: JobNormalizer::new(),
            scorer: RuleScorer::new(config.scoring),
            aggregator: ScoreAggregator::new(config.weights),
            ranker: Box::new(FinalScoreRanker::new()),
            pool: None,
            config,
        }
    }
}

/// Stand-in for a job that could not be normalized, keeping whatever
/// identity fields are still readable
fn placeholder(raw: &RawJob) -> JobPosting {
    let id = fields::identifier(&raw.id, "id").ok().flatten().unwrap_or_default();
    let title = fields::display_text(&raw.title, "title").ok().flatten().unwrap_or_default();
    let company = fields::display_text(&raw.company, "company").ok().flatten().unwrap_or_default();
    JobPosting::new(id, title, company)
}
