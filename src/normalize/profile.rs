use crate::core::{RawProfile, UserProfile, WorkMode};
use crate::error::Result;
use crate::normalize::{fields, tokenize};

/// Builds a [`UserProfile`] from store attributes. Never fails.
pub struct ProfileNormalizer;

impl ProfileNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw profile.
    ///
    /// Missing fields become empty sets or `None`. Fields of the wrong type
    /// are dropped with a warning rather than failing the request, and a
    /// negative minimum remuneration is discarded.
    pub fn normalize(&self, raw: &RawProfile) -> UserProfile {
        let id = fields::identifier(&raw.id, "id").unwrap_or_else(|e| {
            tracing::warn!(error = %e, "profile id ignored");
            None
        });
        let label = id.as_deref().unwrap_or("anonymous");

        let skills = lenient(label, fields::list(&raw.skills, "skills"));
        let soft_skills = lenient(label, fields::list(&raw.soft_skills, "soft_skills"));
        let preferred_locations =
            lenient(label, fields::list(&raw.preferred_locations, "preferred_locations"));
        let location = lenient(label, fields::text(&raw.location, "location"));

        let bio_tokens = lenient(label, fields::display_text(&raw.bio, "bio"))
            .map(|bio| tokenize(&bio))
            .unwrap_or_default();

        let preferred_work_modes = lenient(
            label,
            fields::list(&raw.preferred_work_modes, "preferred_work_modes"),
        )
        .into_iter()
        .filter_map(|label_text| {
            let mode = WorkMode::from_label(&label_text);
            if mode.is_none() {
                tracing::debug!(profile_id = label, value = %label_text, "unknown work mode ignored");
            }
            mode
        })
        .collect();

        let min_remuneration = match lenient(label, fields::number(&raw.min_remuneration, "min_remuneration")) {
            Some(value) if value < 0.0 => {
                tracing::warn!(profile_id = label, value, "negative min_remuneration ignored");
                None
            }
            other => other,
        };

        let currency = lenient(label, fields::text(&raw.currency, "currency"))
            .map(|code| code.to_uppercase());

        UserProfile {
            id,
            skills,
            soft_skills,
            bio_tokens,
            location,
            preferred_locations,
            preferred_work_modes,
            min_remuneration,
            currency,
        }
    }
}

impl Default for ProfileNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn lenient<T: Default>(profile_id: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(profile_id, error = %e, "profile field ignored");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> UserProfile {
        let raw: RawProfile = serde_json::from_value(value).unwrap();
        ProfileNormalizer::new().normalize(&raw)
    }

    #[test]
    fn test_full_profile() {
        let profile = normalize(json!({
            "id": "u-1",
            "bio": "Data engineer passionate about the cloud and Spark pipelines",
            "location": "  Casablanca ",
            "skills": "Python, SQL, python",
            "soft_skills": ["Teamwork"],
            "preferred_locations": "Rabat, Casablanca",
            "preferred_work_modes": ["Remote", "hybride", "non_precise"],
            "min_remuneration": "8000",
            "currency": "mad"
        }));

        assert_eq!(profile.id.as_deref(), Some("u-1"));
        assert_eq!(profile.skills.len(), 2);
        assert!(profile.skills.contains("python"));
        assert!(profile.soft_skills.contains("teamwork"));
        assert!(profile.bio_tokens.contains("spark"));
        assert!(!profile.bio_tokens.contains("the"));
        assert_eq!(profile.location.as_deref(), Some("casablanca"));
        assert!(profile.preferred_locations.contains("rabat"));
        assert_eq!(profile.preferred_work_modes.len(), 2);
        assert!(profile.preferred_work_modes.contains(&WorkMode::Hybrid));
        assert_eq!(profile.min_remuneration, Some(8000.0));
        assert_eq!(profile.currency.as_deref(), Some("MAD"));
    }

    #[test]
    fn test_empty_profile_never_fails() {
        let profile = normalize(json!({}));
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_wrong_types_are_dropped() {
        let profile = normalize(json!({
            "skills": 42,
            "location": ["casablanca"],
            "min_remuneration": {"amount": 8000},
            "preferred_locations": "rabat"
        }));

        assert!(profile.skills.is_empty());
        assert_eq!(profile.location, None);
        assert_eq!(profile.min_remuneration, None);
        assert!(profile.preferred_locations.contains("rabat"));
    }

    #[test]
    fn test_negative_remuneration_is_dropped() {
        let profile = normalize(json!({"min_remuneration": -10}));
        assert_eq!(profile.min_remuneration, None);
    }
}
