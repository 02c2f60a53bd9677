use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::alerts::{
    alert_for_prediction, alerts_for_assessment, AlertDraft, AlertError, AlertPublisher,
};
use super::engagement::{
    CaseEngagementHistory, DropoutModel, DropoutPredictionResult, HeuristicDropoutModel,
};
use super::matching::{
    available_providers, AvailabilityFilter, CaseProfile, MatchCandidate, ProviderAvailability,
    ProviderMatchingEngine, ProviderProfile, DEFAULT_TOP_N,
};
use super::narrative::{CrisisScanner, NarrativeSignal, NarrativeText};
use super::risk::{RiskAssessmentResult, RiskScoringEngine};
use super::screening::{Gad7Responses, Phq9Responses, ScreeningError, ScreeningTotals};
use crate::config::TriagePolicy;

/// Everything gathered at intake, plus the language collaborator's output if it ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    #[serde(default)]
    pub phq9: Phq9Responses,
    #[serde(default)]
    pub gad7: Gad7Responses,
    pub narrative: NarrativeText,
    #[serde(default)]
    pub nlu: Option<NarrativeSignal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeAssessment {
    pub totals: ScreeningTotals,
    pub self_harm_item: u8,
    pub crisis_phrases: BTreeSet<String>,
    pub assessment: RiskAssessmentResult,
    pub alerts: Vec<AlertDraft>,
}

/// Raw engine inputs for callers that already hold questionnaire totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreRequest {
    pub depression_total: u32,
    pub anxiety_total: u32,
    pub sentiment: f64,
    #[serde(default)]
    pub crisis_phrases: BTreeSet<String>,
    #[serde(default)]
    pub self_harm_item: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub case: CaseProfile,
    pub roster: Vec<ProviderProfile>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub roster: Vec<ProviderProfile>,
    #[serde(default)]
    pub filter: AvailabilityFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub prediction: DropoutPredictionResult,
    pub intervention_recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertDraft>,
}

/// Facade wiring the policy, the three engines, the crisis scan, and alert delivery.
pub struct TriageService<A> {
    risk: Arc<RiskScoringEngine>,
    matching: Arc<ProviderMatchingEngine>,
    dropout: Arc<dyn DropoutModel>,
    scanner: Arc<CrisisScanner>,
    alerts: Arc<A>,
}

impl<A> TriageService<A>
where
    A: AlertPublisher + 'static,
{
    pub fn new(policy: &TriagePolicy, alerts: Arc<A>) -> Self {
        Self::with_model(policy, alerts, Arc::new(HeuristicDropoutModel))
    }

    pub fn with_model(
        policy: &TriagePolicy,
        alerts: Arc<A>,
        dropout: Arc<dyn DropoutModel>,
    ) -> Self {
        Self {
            risk: Arc::new(RiskScoringEngine::new(policy.thresholds)),
            matching: Arc::new(ProviderMatchingEngine::from_policy(policy)),
            dropout,
            scanner: Arc::new(CrisisScanner::from_policy(policy)),
            alerts,
        }
    }

    /// Validate answers, merge narrative signals, score, and publish any alerts.
    pub fn assess_intake(
        &self,
        submission: IntakeSubmission,
    ) -> Result<IntakeAssessment, TriageServiceError> {
        let IntakeSubmission {
            phq9,
            gad7,
            narrative,
            nlu,
        } = submission;

        let totals = ScreeningTotals::from_responses(&phq9, &gad7).map_err(|err| {
            warn!(error = %err, "rejected screening submission");
            err
        })?;
        let self_harm_item = phq9.self_harm_item();

        let signal = self
            .scanner
            .merge(nlu.unwrap_or_default(), &narrative.combined());
        let assessment = self.risk.assess(&totals, &signal, self_harm_item);

        if !assessment.floors_applied.is_empty() {
            warn!(
                floors = ?assessment.floors_applied,
                score = assessment.overall_score,
                "safety floor raised risk score"
            );
        }

        let alerts = alerts_for_assessment(&assessment, &signal.crisis_phrases);
        for alert in &alerts {
            self.alerts.publish(alert.clone())?;
        }

        info!(
            risk_level = assessment.risk_level.label(),
            urgency = assessment.urgency.label(),
            alerts = alerts.len(),
            "intake assessed"
        );

        Ok(IntakeAssessment {
            totals,
            self_harm_item,
            crisis_phrases: signal.crisis_phrases,
            assessment,
            alerts,
        })
    }

    pub fn score(&self, request: &RiskScoreRequest) -> RiskAssessmentResult {
        self.risk.score(
            request.depression_total,
            request.anxiety_total,
            request.sentiment,
            &request.crisis_phrases,
            request.self_harm_item,
        )
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Vec<MatchCandidate> {
        let ranked = self
            .matching
            .rank(&request.case, &request.roster, request.top_n);
        debug!(
            roster = request.roster.len(),
            returned = ranked.len(),
            top_score = ranked.first().map(|candidate| candidate.score),
            "providers ranked"
        );
        ranked
    }

    pub fn availability(&self, request: &AvailabilityRequest) -> Vec<ProviderAvailability> {
        available_providers(&request.roster, &request.filter)
    }

    /// Predict disengagement and publish an outreach alert when warranted.
    pub fn predict(
        &self,
        history: &CaseEngagementHistory,
    ) -> Result<PredictionReport, TriageServiceError> {
        let prediction = self.dropout.predict(history);
        let alert = alert_for_prediction(&prediction);
        if let Some(alert) = &alert {
            self.alerts.publish(alert.clone())?;
        }

        debug!(
            probability = prediction.probability,
            confidence = prediction.confidence,
            model = %prediction.model_version,
            "dropout predicted"
        );

        Ok(PredictionReport {
            intervention_recommended: prediction.intervention_recommended(),
            prediction,
            alert,
        })
    }
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Screening(#[from] ScreeningError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
