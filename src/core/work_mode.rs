use serde::{Deserialize, Serialize};
use std::fmt;

/// Work arrangement offered by a job or wanted by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkMode {
    /// Fully remote
    Remote,
    /// Mix of remote and on-site days
    Hybrid,
    /// Office / on-site only
    OnSite,
}

impl WorkMode {
    /// Parse a trimmed, lowercase label.
    ///
    /// Accepts the English labels plus the French spellings produced by the
    /// job structuring step (`hybride`, `présentiel`, `télétravail`).
    /// Unknown labels such as `non_precise` yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "remote" | "full remote" | "full-remote" | "télétravail" | "teletravail" => {
                Some(WorkMode::Remote)
            }
            "hybrid" | "hybride" => Some(WorkMode::Hybrid),
            "on-site" | "onsite" | "on site" | "on_site" | "office" | "in-office"
            | "présentiel" | "presentiel" => Some(WorkMode::OnSite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::Hybrid => "hybrid",
            WorkMode::OnSite => "on-site",
        }
    }

    /// Whether one side is hybrid and the other remote or on-site.
    ///
    /// Symmetric: a hybrid job partially satisfies a remote or
    /// on-site preference, and a hybrid preference is partially satisfied by
    /// a remote or on-site job. Remote against on-site is never adjacent.
    pub fn is_adjacent(&self, other: WorkMode) -> bool {
        matches!(
            (self, other),
            (WorkMode::Hybrid, WorkMode::Remote)
                | (WorkMode::Hybrid, WorkMode::OnSite)
                | (WorkMode::Remote, WorkMode::Hybrid)
                | (WorkMode::OnSite, WorkMode::Hybrid)
        )
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
