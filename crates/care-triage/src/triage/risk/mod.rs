mod policy;
mod rules;

pub use policy::{RiskLevel, SafetyFloor, Urgency, SELF_HARM_SIGNAL};
pub use rules::{
    anxiety_risk, crisis_phrase_risk, depression_risk, self_harm_risk, sentiment_risk,
    FALLBACK_RISK,
};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::narrative::NarrativeSignal;
use super::screening::ScreeningTotals;
use crate::config::RiskThresholds;
use policy::{apply_floors, classify, recommend_urgency, SafetySignals};
use rules::{
    round2, ANXIETY_WEIGHT, CRISIS_PHRASE_WEIGHT, DEPRESSION_WEIGHT, SELF_HARM_WEIGHT,
    SENTIMENT_WEIGHT,
};

/// Stateless scorer combining questionnaire, narrative, and self-harm signals.
#[derive(Debug, Clone)]
pub struct RiskScoringEngine {
    thresholds: RiskThresholds,
}

impl RiskScoringEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Blend the five components, apply safety floors, and derive level and urgency.
    ///
    /// Out-of-range totals, sentiment, or self-harm answers fall back to mid-range risk
    /// instead of failing.
    pub fn score(
        &self,
        depression_total: u32,
        anxiety_total: u32,
        sentiment: f64,
        crisis_phrases: &BTreeSet<String>,
        self_harm_item: u8,
    ) -> RiskAssessmentResult {
        let depression = depression_risk(depression_total);
        let anxiety = anxiety_risk(anxiety_total);
        let sentiment_component = sentiment_risk(sentiment);
        let crisis_phrase = crisis_phrase_risk(crisis_phrases.len());
        let self_harm = self_harm_risk(self_harm_item);

        let weighted = depression * DEPRESSION_WEIGHT
            + anxiety * ANXIETY_WEIGHT
            + sentiment_component * SENTIMENT_WEIGHT
            + crisis_phrase * CRISIS_PHRASE_WEIGHT
            + self_harm * SELF_HARM_WEIGHT;

        let signals = SafetySignals::new(crisis_phrases.len(), self_harm_item);
        let (overall, floors_applied) = apply_floors(weighted, &signals);
        let risk_level = classify(overall, &self.thresholds);
        let urgency = recommend_urgency(overall, &signals, &self.thresholds);

        tracing::trace!(
            weighted,
            overall,
            risk_level = risk_level.label(),
            urgency = urgency.label(),
            "risk score computed"
        );

        RiskAssessmentResult {
            overall_score: round2(overall),
            risk_level,
            urgency,
            components: RiskComponents {
                depression: round2(depression),
                anxiety: round2(anxiety),
                sentiment: round2(sentiment_component),
                crisis_phrase: round2(crisis_phrase),
                self_harm: round2(self_harm),
            },
            floors_applied,
        }
    }

    pub fn assess(
        &self,
        totals: &ScreeningTotals,
        signal: &NarrativeSignal,
        self_harm_item: u8,
    ) -> RiskAssessmentResult {
        self.score(
            totals.depression_total,
            totals.anxiety_total,
            signal.sentiment,
            &signal.crisis_phrases,
            self_harm_item,
        )
    }
}

impl Default for RiskScoringEngine {
    fn default() -> Self {
        Self::new(RiskThresholds::default())
    }
}

/// Per-component risk percentages before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub depression: f64,
    pub anxiety: f64,
    pub sentiment: f64,
    pub crisis_phrase: f64,
    pub self_harm: f64,
}

/// Outcome of one screening submission. Callers persist it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub urgency: Urgency,
    pub components: RiskComponents,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floors_applied: Vec<SafetyFloor>,
}
