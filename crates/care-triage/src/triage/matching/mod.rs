mod availability;
mod domain;
pub mod roster;
mod rules;

pub use availability::{available_providers, AvailabilityFilter, ProviderAvailability};
pub use domain::{CaseProfile, MatchCandidate, ProviderId, ProviderProfile};
pub use roster::{parse_roster, read_roster, RosterImportError};

use crate::config::{SpecialtyKeywords, TriagePolicy};
use rules::{score_provider, SpecialtyTable};

/// Number of candidates returned when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// Stateless ranker scoring roster entries against a single case.
pub struct ProviderMatchingEngine {
    specialties: SpecialtyTable,
}

impl ProviderMatchingEngine {
    pub fn new(specialty_keywords: &[SpecialtyKeywords]) -> Self {
        Self {
            specialties: SpecialtyTable::new(specialty_keywords),
        }
    }

    pub fn from_policy(policy: &TriagePolicy) -> Self {
        Self::new(&policy.specialty_keywords)
    }

    pub fn score(&self, case: &CaseProfile, provider: &ProviderProfile) -> MatchCandidate {
        let concern = case.primary_concern.to_lowercase();
        self.score_with_concern(case, &concern, provider)
    }

    /// Rank `candidates` best-first, keeping roster order among equal scores.
    pub fn rank(
        &self,
        case: &CaseProfile,
        candidates: &[ProviderProfile],
        top_n: usize,
    ) -> Vec<MatchCandidate> {
        let concern = case.primary_concern.to_lowercase();
        let mut ranked: Vec<MatchCandidate> = candidates
            .iter()
            .map(|provider| self.score_with_concern(case, &concern, provider))
            .collect();

        // Stable sort: ties keep roster order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_n);
        ranked
    }

    fn score_with_concern(
        &self,
        case: &CaseProfile,
        concern: &str,
        provider: &ProviderProfile,
    ) -> MatchCandidate {
        let (score, reasoning) = score_provider(case, concern, provider, &self.specialties);
        MatchCandidate {
            provider: provider.clone(),
            score: (score * 100.0).round() / 100.0,
            reasoning,
        }
    }
}

impl Default for ProviderMatchingEngine {
    fn default() -> Self {
        Self::from_policy(&TriagePolicy::default())
    }
}
