use serde::{Deserialize, Serialize};

use super::domain::ProviderProfile;

/// Optional roster filters; unset fields match everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityFilter {
    pub specialty: Option<String>,
    pub language: Option<String>,
    pub accepts_high_risk: Option<bool>,
}

impl AvailabilityFilter {
    fn admits(&self, provider: &ProviderProfile) -> bool {
        if let Some(specialty) = &self.specialty {
            if !provider.has_specialty(specialty) {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !provider.speaks(language) {
                return false;
            }
        }
        if let Some(accepts) = self.accepts_high_risk {
            if provider.accepts_high_risk != accepts {
                return false;
            }
        }
        true
    }
}

/// Capacity summary for a provider that can take new cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub provider: ProviderProfile,
    pub capacity_remaining: u32,
    pub utilization_percent: f64,
}

/// Providers with open capacity that satisfy `filter`, in roster order.
pub fn available_providers(
    roster: &[ProviderProfile],
    filter: &AvailabilityFilter,
) -> Vec<ProviderAvailability> {
    roster
        .iter()
        .filter(|provider| provider.has_capacity() && filter.admits(provider))
        .map(|provider| ProviderAvailability {
            provider: provider.clone(),
            capacity_remaining: provider.capacity_remaining(),
            utilization_percent: provider.utilization_percent(),
        })
        .collect()
}
