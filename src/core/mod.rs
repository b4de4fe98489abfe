pub mod breakdown;
pub mod job;
pub mod profile;
pub mod work_mode;

pub use breakdown::{clamp_unit, RuleScores, ScoreBreakdown};
pub use job::{JobPosting, RawJob};
pub use profile::{RawProfile, UserProfile};
pub use work_mode::WorkMode;
