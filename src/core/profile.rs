use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::core::WorkMode;

/// Profile attributes as supplied by the user store.
///
/// Every field is optional and loosely typed: list fields may be a JSON array
/// of strings or a single comma-separated string, numbers may arrive as
/// strings. [`crate::normalize::ProfileNormalizer`] turns this into a
/// [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub bio: Value,

    #[serde(default)]
    pub location: Value,

    #[serde(default)]
    pub skills: Value,

    #[serde(default)]
    pub soft_skills: Value,

    #[serde(default)]
    pub preferred_locations: Value,

    #[serde(default, alias = "preferred_mode_travail")]
    pub preferred_work_modes: Value,

    #[serde(default)]
    pub min_remuneration: Value,

    #[serde(default)]
    pub currency: Value,
}

impl RawProfile {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Canonical user profile, built once per request and never mutated.
///
/// All set members are trimmed, lowercase and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Store identifier, only used in log fields
    #[serde(default)]
    pub id: Option<String>,

    /// Technical skills
    #[serde(default)]
    pub skills: BTreeSet<String>,

    #[serde(default)]
    pub soft_skills: BTreeSet<String>,

    /// Word tokens from the free-text bio (fallback skill signal)
    #[serde(default)]
    pub bio_tokens: BTreeSet<String>,

    /// Current location
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub preferred_locations: BTreeSet<String>,

    #[serde(default)]
    pub preferred_work_modes: BTreeSet<WorkMode>,

    /// Minimum acceptable compensation, non-negative
    #[serde(default)]
    pub min_remuneration: Option<f64>,

    /// Currency of `min_remuneration` (uppercase code)
    #[serde(default)]
    pub currency: Option<String>,
}

impl UserProfile {
    /// Whether the user expressed any location preference at all
    pub fn has_location_preference(&self) -> bool {
        self.location.is_some() || !self.preferred_locations.is_empty()
    }

    /// Current location followed by preferred locations
    pub fn location_candidates(&self) -> impl Iterator<Item = &str> {
        self.location
            .as_deref()
            .into_iter()
            .chain(self.preferred_locations.iter().map(String::as_str))
    }

    /// Display label for logs
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("anonymous")
    }
}
