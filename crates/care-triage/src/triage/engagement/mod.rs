//! Disengagement (dropout) estimation for enrolled cases.
//!
//! The shipped model is an additive heuristic. Callers depend on [`DropoutModel`] so a
//! trained classifier can replace it without touching the contract.

mod confidence;
mod factors;
mod sessions;

pub use sessions::{history_from_sessions, SessionRecord, SessionStatus};

use serde::{Deserialize, Serialize};

/// Probability at or above which a case is flagged for outreach.
pub const INTERVENTION_THRESHOLD: f64 = 70.0;

pub const HEURISTIC_MODEL_VERSION: &str = "1.0.0-heuristic";

/// Session-history snapshot for one enrolled case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseEngagementHistory {
    #[serde(default)]
    pub attended: u32,
    #[serde(default)]
    pub cancelled: u32,
    #[serde(default)]
    pub no_show: u32,
    #[serde(default)]
    pub days_since_last_session: u32,
    #[serde(default)]
    pub sentiment_trend: Option<f64>,
    #[serde(default)]
    pub avg_response_hours: Option<f64>,
}

impl CaseEngagementHistory {
    pub fn total_sessions(&self) -> u32 {
        self.attended
            .saturating_add(self.cancelled)
            .saturating_add(self.no_show)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropoutPredictionResult {
    /// 0-100.
    pub probability: f64,
    /// Triggered factors in evaluation order.
    pub risk_factors: Vec<String>,
    /// 20-100; lower when inputs are missing.
    pub confidence: f64,
    pub model_version: String,
}

impl DropoutPredictionResult {
    pub fn intervention_recommended(&self) -> bool {
        self.probability >= INTERVENTION_THRESHOLD
    }
}

/// Seam for swapping the heuristic for a trained model.
pub trait DropoutModel: Send + Sync {
    fn predict(&self, history: &CaseEngagementHistory) -> DropoutPredictionResult;

    fn version(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDropoutModel;

impl DropoutModel for HeuristicDropoutModel {
    fn predict(&self, history: &CaseEngagementHistory) -> DropoutPredictionResult {
        let (probability, risk_factors) = factors::accumulate(history).finish();
        let confidence = confidence::confidence(history);

        DropoutPredictionResult {
            probability: round2(probability),
            risk_factors,
            confidence: round2(confidence),
            model_version: self.version().to_string(),
        }
    }

    fn version(&self) -> &str {
        HEURISTIC_MODEL_VERSION
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
