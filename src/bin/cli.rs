use anyhow::Context;
use clap::{Parser, Subcommand};
use jobmatch_engine::{EngineConfig, MatchEngine, RawJob, RawProfile, Window};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(about = "JobMatch scoring and ranking CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine config file (.json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one job against a profile
    Score {
        /// Profile JSON file
        profile: PathBuf,

        /// Job JSON file (single object)
        job: PathBuf,
    },

    /// Rank a list of jobs for a profile
    Rank {
        /// Profile JSON file
        profile: PathBuf,

        /// Jobs JSON file (array of objects)
        jobs: PathBuf,

        /// Number of ranked jobs to skip
        #[arg(short, long, default_value = "0")]
        skip: usize,

        /// Maximum jobs to return
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref()).context("loading engine config")?;
    let engine = MatchEngine::new(config)?;

    match cli.command {
        Commands::Score { profile, job } => {
            let raw_profile = RawProfile::from_json(&read(&profile)?)
                .with_context(|| format!("parsing profile {}", profile.display()))?;
            let raw_job = RawJob::from_json(&read(&job)?)
                .with_context(|| format!("parsing job {}", job.display()))?;

            let profile = engine.normalize_profile(&raw_profile);
            let job = engine.normalize_job(&raw_job)?;
            let breakdown = engine.score_job(&profile, &job);

            tracing::info!(job = %job.display_name(), "{}", breakdown.display());
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }

        Commands::Rank {
            profile,
            jobs,
            skip,
            limit,
            pretty,
        } => {
            let raw_profile = RawProfile::from_json(&read(&profile)?)
                .with_context(|| format!("parsing profile {}", profile.display()))?;
            let raw_jobs = RawJob::list_from_json(&read(&jobs)?)
                .with_context(|| format!("parsing jobs {}", jobs.display()))?;

            let page = engine.rank_raw_jobs(&raw_profile, &raw_jobs, Window::new(skip, limit));

            tracing::info!(
                total = page.total,
                returned = page.len(),
                failed = page.failed,
                ranker = engine.ranker_name(),
                "ranking complete"
            );

            let output = if pretty {
                serde_json::to_string_pretty(&page)?
            } else {
                page.to_json()?
            };
            println!("{}", output);
        }
    }

    Ok(())
}
