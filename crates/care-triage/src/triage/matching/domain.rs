use serde::{Deserialize, Serialize};

use crate::triage::risk::RiskLevel;

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

/// Roster snapshot of one care provider. The matching engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: ProviderId,
    pub name: String,
    pub max_caseload: u32,
    pub current_caseload: u32,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub accepts_high_risk: bool,
    #[serde(default)]
    pub years_experience: Option<u32>,
}

impl ProviderProfile {
    pub fn has_capacity(&self) -> bool {
        self.current_caseload < self.max_caseload
    }

    pub fn capacity_remaining(&self) -> u32 {
        self.max_caseload.saturating_sub(self.current_caseload)
    }

    pub fn utilization_percent(&self) -> f64 {
        if self.max_caseload == 0 {
            return 0.0;
        }
        let percent = f64::from(self.current_caseload) / f64::from(self.max_caseload) * 100.0;
        (percent * 100.0).round() / 100.0
    }

    pub fn speaks(&self, language: &str) -> bool {
        let language = language.trim();
        self.languages
            .iter()
            .any(|spoken| spoken.trim().eq_ignore_ascii_case(language))
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        let wanted = normalize_tag(specialty);
        self.specialties
            .iter()
            .any(|tag| normalize_tag(tag) == wanted)
    }
}

/// Case attributes the matcher scores against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseProfile {
    /// `None` when no assessment exists yet; scored like a low/moderate case.
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    pub primary_concern: String,
    #[serde(default = "default_language")]
    pub preferred_language: String,
    /// Carried through for staff review; not part of the score.
    #[serde(default)]
    pub preferred_provider_gender: Option<String>,
}

fn default_language() -> String {
    "English".to_string()
}

/// One ranked provider with its score and the per-factor reasoning trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub provider: ProviderProfile,
    pub score: f64,
    pub reasoning: Vec<String>,
}

/// Tags compare case-insensitively with `_`, `-`, and spaces treated alike.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
