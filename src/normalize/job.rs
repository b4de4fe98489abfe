use crate::core::{clamp_unit, JobPosting, RawJob, WorkMode};
use crate::error::{EngineError, Result};
use crate::normalize::{fields, tokenize};

/// Builds a [`JobPosting`] from store attributes.
///
/// Missing fields never fail. A present field with an unexpected type, a
/// negative salary or a non-finite score does, so the caller can isolate the
/// offending job.
pub struct JobNormalizer;

impl JobNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &RawJob) -> Result<JobPosting> {
        let id = fields::identifier(&raw.id, "id")?.unwrap_or_default();
        let title = fields::display_text(&raw.title, "title")?.unwrap_or_default();
        let company = fields::display_text(&raw.company, "company")?.unwrap_or_default();
        let description = fields::display_text(&raw.description, "description")?.unwrap_or_default();

        let required_skills = fields::list(&raw.required_skills, "required_skills")?;
        let location = fields::text(&raw.location, "location")?;

        let work_mode = fields::text(&raw.work_mode, "work_mode")?.and_then(|label| {
            let mode = WorkMode::from_label(&label);
            if mode.is_none() {
                tracing::debug!(job_id = %id, value = %label, "unknown work mode treated as absent");
            }
            mode
        });

        let mut salary_min = non_negative(fields::number(&raw.salary_min, "salary_min")?, "salary_min")?;
        let mut salary_max = non_negative(fields::number(&raw.salary_max, "salary_max")?, "salary_max")?;
        if let (Some(min), Some(max)) = (salary_min, salary_max) {
            if min > max {
                salary_min = Some(max);
                salary_max = Some(min);
            }
        }

        let currency = fields::text(&raw.currency, "currency")?.map(|code| code.to_uppercase());
        let remuneration_text = fields::display_text(&raw.remuneration_text, "remuneration_text")?;

        let embedding_score = fields::number(&raw.embedding_score, "embedding_score")?.map(clamp_unit);
        let rerank_score = fields::number(&raw.rerank_score, "rerank_score")?;
        let posted_at = fields::timestamp(&raw.posted_at, "posted_at")?;

        let searchable_tokens = tokenize(&format!("{} {} {}", title, company, description));

        Ok(JobPosting {
            id,
            title,
            company,
            description,
            required_skills,
            location,
            work_mode,
            salary_min,
            salary_max,
            currency,
            remuneration_text,
            embedding_score,
            rerank_score,
            posted_at,
            searchable_tokens,
        })
    }
}

impl Default for JobNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn non_negative(value: Option<f64>, field: &str) -> Result<Option<f64>> {
    match value {
        Some(v) if v < 0.0 => Err(EngineError::invalid_field(field, format!("negative amount {}", v))),
        other => Ok(other),
    }
}
