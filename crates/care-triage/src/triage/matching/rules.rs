use std::collections::BTreeSet;

use super::domain::{normalize_tag, CaseProfile, ProviderProfile};
use crate::config::SpecialtyKeywords;

pub(crate) const CAPACITY_POINTS: f64 = 40.0;
pub(crate) const HIGH_RISK_POINTS: f64 = 25.0;
pub(crate) const STANDARD_RISK_POINTS: f64 = 15.0;
pub(crate) const SPECIALTY_POINTS: f64 = 20.0;
pub(crate) const GENERAL_PRACTICE_POINTS: f64 = 5.0;
pub(crate) const LANGUAGE_POINTS: f64 = 10.0;
pub(crate) const SENIOR_EXPERIENCE_POINTS: f64 = 5.0;
pub(crate) const MID_EXPERIENCE_POINTS: f64 = 3.0;

struct SpecialtyEntry {
    tag: String,
    label: String,
    keywords: Vec<String>,
}

/// Ordered keyword table; evaluation order decides which specialty is credited.
pub(crate) struct SpecialtyTable {
    entries: Vec<SpecialtyEntry>,
}

impl SpecialtyTable {
    pub(crate) fn new(table: &[SpecialtyKeywords]) -> Self {
        let entries = table
            .iter()
            .map(|row| SpecialtyEntry {
                tag: normalize_tag(&row.specialty),
                label: row.specialty.clone(),
                keywords: row
                    .keywords
                    .iter()
                    .map(|keyword| keyword.trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// First table specialty the provider holds whose keywords occur in `concern`.
    pub(crate) fn first_match(&self, concern: &str, provider_tags: &BTreeSet<String>) -> Option<&str> {
        self.entries
            .iter()
            .filter(|entry| provider_tags.contains(&entry.tag))
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| concern.contains(keyword.as_str()))
            })
            .map(|entry| entry.label.as_str())
    }
}

/// Score one provider. `concern` must already be lower-cased.
pub(crate) fn score_provider(
    case: &CaseProfile,
    concern: &str,
    provider: &ProviderProfile,
    specialties: &SpecialtyTable,
) -> (f64, Vec<String>) {
    let mut reasoning = Vec::with_capacity(5);

    if !provider.has_capacity() {
        reasoning.push(format!(
            "no current capacity ({}/{} cases)",
            provider.current_caseload, provider.max_caseload
        ));
        return (0.0, reasoning);
    }

    let remaining = provider.capacity_remaining();
    let mut score =
        f64::from(remaining) / f64::from(provider.max_caseload) * CAPACITY_POINTS;
    reasoning.push(format!(
        "{remaining} of {} slots available",
        provider.max_caseload
    ));

    let elevated = case.risk_level.map(|level| level.is_elevated()).unwrap_or(false);
    if elevated {
        if provider.accepts_high_risk {
            score += HIGH_RISK_POINTS;
            reasoning.push("accepts high-risk clients".to_string());
        } else {
            reasoning.push("does not accept high-risk clients".to_string());
        }
    } else {
        score += STANDARD_RISK_POINTS;
        reasoning.push("risk level compatible".to_string());
    }

    let provider_tags: BTreeSet<String> = provider
        .specialties
        .iter()
        .map(|tag| normalize_tag(tag))
        .collect();
    match specialties.first_match(concern, &provider_tags) {
        Some(specialty) => {
            score += SPECIALTY_POINTS;
            reasoning.push(format!("specialty match: {specialty}"));
        }
        None => {
            score += GENERAL_PRACTICE_POINTS;
            reasoning.push("general practice".to_string());
        }
    }

    let language = case.preferred_language.trim();
    if provider.speaks(language) {
        score += LANGUAGE_POINTS;
        reasoning.push(format!("speaks {language}"));
    } else {
        reasoning.push(format!("{language} not available"));
    }

    match provider.years_experience {
        Some(years) if years >= 10 => {
            score += SENIOR_EXPERIENCE_POINTS;
            reasoning.push(format!("{years}+ years experience"));
        }
        Some(years) if years >= 5 => {
            score += MID_EXPERIENCE_POINTS;
            reasoning.push(format!("{years} years experience"));
        }
        Some(years) => reasoning.push(format!("{years} years experience (no bonus)")),
        None => reasoning.push("experience not recorded".to_string()),
    }

    (score, reasoning)
}
