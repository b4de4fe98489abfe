use crate::config::ScoringConfig;
use crate::core::{JobPosting, RuleScores, UserProfile};
use crate::normalize::{canonical, is_token_char, tokenize};

/// Deterministic per-criterion scoring of a job against a profile.
///
/// A criterion the user expressed no preference for scores `neutral_score`
/// instead of zero. Missing job data is neutral for work mode; for location it
/// is a miss once the user has a preference.
#[derive(Debug, Clone)]
pub struct RuleScorer {
    config: ScoringConfig,
}

impl RuleScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &UserProfile, job: &JobPosting) -> RuleScores {
        RuleScores {
            skills: self.skills(profile, job),
            location: self.location(profile, job),
            work_mode: self.work_mode(profile, job),
            remuneration: self.remuneration(profile, job),
        }
        .clamped()
    }

    /// Overlap count saturating at `expected_skill_count`.
    ///
    /// Jobs without a structured skill list are matched against their free
    /// text, using both declared skills and bio tokens.
    pub fn skills(&self, profile: &UserProfile, job: &JobPosting) -> f64 {
        let matched = if !job.required_skills.is_empty() {
            profile.skills.intersection(&job.required_skills).count()
        } else {
            profile
                .skills
                .union(&profile.bio_tokens)
                .filter(|skill| mentions(job, skill))
                .count()
        };

        let expected = self.config.expected_skill_count.max(1) as f64;
        (matched as f64 / expected).min(1.0)
    }

    /// Neutral only when the user has no location preference at all; once
    /// one exists, a job without a location is a miss.
    pub fn location(&self, profile: &UserProfile, job: &JobPosting) -> f64 {
        if !profile.has_location_preference() {
            return self.config.neutral_score;
        }
        let Some(job_location) = job.location.as_deref() else {
            return 0.0;
        };

        let mut best = 0.0;
        for wanted in profile.location_candidates().filter(|c| !c.is_empty()) {
            if same_place(job_location, wanted) {
                return 1.0;
            }
            if job_location.contains(wanted) || wanted.contains(job_location) {
                best = self.config.location_partial_credit;
            }
        }
        best
    }

    pub fn work_mode(&self, profile: &UserProfile, job: &JobPosting) -> f64 {
        let mode = match job.work_mode {
            Some(mode) if !profile.preferred_work_modes.is_empty() => mode,
            _ => return self.config.neutral_score,
        };

        if profile.preferred_work_modes.contains(&mode) {
            1.0
        } else if profile
            .preferred_work_modes
            .iter()
            .any(|preferred| preferred.is_adjacent(mode))
        {
            self.config.work_mode_partial_credit
        } else {
            0.0
        }
    }

    pub fn remuneration(&self, profile: &UserProfile, job: &JobPosting) -> f64 {
        let Some(minimum) = profile.min_remuneration else {
            return self.config.neutral_score;
        };

        if let (Some(wanted), Some(offered)) = (profile.currency.as_deref(), job.currency.as_deref()) {
            if wanted != offered {
                return self.config.neutral_score;
            }
        }

        match job.salary_ceiling() {
            Some(ceiling) if ceiling >= minimum => 1.0,
            Some(_) => 0.0,
            None if job.remuneration_text.as_deref().is_some_and(|t| !t.trim().is_empty()) => {
                self.config.remuneration_text_credit
            }
            None => 0.0,
        }
    }
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Exact match against the whole location or one of its comma-separated parts
fn same_place(job_location: &str, wanted: &str) -> bool {
    job_location == wanted || job_location.split(',').any(|part| part.trim() == wanted)
}

/// A skill is mentioned when every one of its word tokens appears in the
/// job text. Single-letter skills (`r`, `c`) are too short to be tokens and
/// are looked up as whole words instead.
fn mentions(job: &JobPosting, skill: &str) -> bool {
    let words = tokenize(skill);
    if words.is_empty() {
        let skill = canonical(skill);
        if skill.is_empty() {
            return false;
        }
        let text = canonical(&format!("{} {} {}", job.title, job.company, job.description));
        return text.split(|c: char| !is_token_char(c)).any(|word| word == skill);
    }
    words.iter().all(|word| job.searchable_tokens.contains(word))
}
