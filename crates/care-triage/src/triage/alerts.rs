use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::engagement::DropoutPredictionResult;
use super::risk::{RiskAssessmentResult, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighRisk,
    CrisisPhrase,
    DropoutRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Moderate,
    High,
    Critical,
}

/// Staff-facing alert the caller stores and routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
}

/// High-risk and crisis-phrase alerts for a finished assessment.
pub fn alerts_for_assessment(
    result: &RiskAssessmentResult,
    crisis_phrases: &BTreeSet<String>,
) -> Vec<AlertDraft> {
    let mut alerts = Vec::new();

    if result.risk_level.is_elevated() {
        let severity = if result.risk_level == RiskLevel::Critical {
            AlertSeverity::Critical
        } else {
            AlertSeverity::High
        };
        alerts.push(AlertDraft {
            kind: AlertKind::HighRisk,
            severity,
            title: format!("{} risk case", capitalize(result.risk_level.label())),
            description: format!(
                "Risk score: {:.2}/100. Urgency: {}",
                result.overall_score,
                result.urgency.label()
            ),
        });
    }

    if !crisis_phrases.is_empty() {
        let phrases: Vec<&str> = crisis_phrases.iter().map(String::as_str).collect();
        alerts.push(AlertDraft {
            kind: AlertKind::CrisisPhrase,
            severity: AlertSeverity::Critical,
            title: "Crisis phrases detected".to_string(),
            description: format!("Phrases: {}", phrases.join(", ")),
        });
    }

    alerts
}

pub fn alert_for_prediction(prediction: &DropoutPredictionResult) -> Option<AlertDraft> {
    if !prediction.intervention_recommended() {
        return None;
    }

    let mut description = format!(
        "Dropout probability {:.2}% (confidence {:.0}%)",
        prediction.probability, prediction.confidence
    );
    if !prediction.risk_factors.is_empty() {
        description.push_str(&format!(": {}", prediction.risk_factors.join("; ")));
    }

    Some(AlertDraft {
        kind: AlertKind::DropoutRisk,
        severity: AlertSeverity::Moderate,
        title: "High disengagement risk".to_string(),
        description,
    })
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Outbound alert hook (pager, e-mail, or a persistence adapter).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: AlertDraft) -> Result<(), AlertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
