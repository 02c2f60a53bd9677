//! Intake triage: risk scoring, provider matching, and disengagement prediction.
//!
//! The engines are pure functions over their inputs and an immutable [`TriagePolicy`];
//! [`TriageService`] adds validation, crisis-phrase scanning, and alert delivery around them.
//!
//! [`TriagePolicy`]: crate::config::TriagePolicy

pub mod alerts;
pub mod engagement;
pub mod matching;
pub mod narrative;
pub mod risk;
pub mod router;
pub mod screening;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertDraft, AlertError, AlertKind, AlertPublisher, AlertSeverity};
pub use engagement::{
    CaseEngagementHistory, DropoutModel, DropoutPredictionResult, HeuristicDropoutModel,
};
pub use matching::{
    CaseProfile, MatchCandidate, ProviderId, ProviderMatchingEngine, ProviderProfile,
    DEFAULT_TOP_N,
};
pub use narrative::{CrisisScanner, NarrativeSignal, NarrativeText};
pub use risk::{RiskAssessmentResult, RiskLevel, RiskScoringEngine, Urgency};
pub use router::triage_router;
pub use screening::{Gad7Responses, Phq9Responses, ScreeningError, ScreeningTotals};
pub use service::{
    AvailabilityRequest, IntakeAssessment, IntakeSubmission, PredictionReport, RecommendRequest,
    RiskScoreRequest, TriageService, TriageServiceError,
};
