use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::TriagePolicy;
use crate::triage::alerts::{AlertDraft, AlertError, AlertPublisher};
use crate::triage::engagement::CaseEngagementHistory;
use crate::triage::matching::{CaseProfile, ProviderId, ProviderProfile};
use crate::triage::narrative::{NarrativeSignal, NarrativeText};
use crate::triage::risk::{RiskLevel, RiskScoringEngine};
use crate::triage::screening::{Gad7Responses, Phq9Responses};
use crate::triage::service::{IntakeSubmission, TriageService};

pub(super) fn engine() -> RiskScoringEngine {
    RiskScoringEngine::default()
}

pub(super) fn phrases(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn provider(
    id: &str,
    max_caseload: u32,
    current_caseload: u32,
    specialties: &[&str],
    languages: &[&str],
    accepts_high_risk: bool,
    years_experience: Option<u32>,
) -> ProviderProfile {
    ProviderProfile {
        id: ProviderId(id.to_string()),
        name: format!("Dr. {id}"),
        max_caseload,
        current_caseload,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        languages: languages.iter().map(|s| s.to_string()).collect(),
        accepts_high_risk,
        years_experience,
    }
}

pub(super) fn case(risk_level: Option<RiskLevel>, concern: &str, language: &str) -> CaseProfile {
    CaseProfile {
        risk_level,
        primary_concern: concern.to_string(),
        preferred_language: language.to_string(),
        preferred_provider_gender: None,
    }
}

pub(super) fn history(attended: u32, cancelled: u32, no_show: u32, days: u32) -> CaseEngagementHistory {
    CaseEngagementHistory {
        attended,
        cancelled,
        no_show,
        days_since_last_session: days,
        sentiment_trend: Some(0.2),
        avg_response_hours: Some(12.0),
    }
}

/// PHQ-9 answers with the self-harm item given separately from the other eight.
pub(super) fn phq9(self_harm: u8, other_items: [u8; 8]) -> Phq9Responses {
    Phq9Responses {
        interest: Some(other_items[0]),
        depressed: Some(other_items[1]),
        sleep: Some(other_items[2]),
        fatigue: Some(other_items[3]),
        appetite: Some(other_items[4]),
        failure: Some(other_items[5]),
        concentration: Some(other_items[6]),
        movement: Some(other_items[7]),
        self_harm: Some(self_harm),
    }
}

pub(super) fn gad7(items: [u8; 7]) -> Gad7Responses {
    Gad7Responses {
        nervous: Some(items[0]),
        control_worry: Some(items[1]),
        worry_much: Some(items[2]),
        trouble_relaxing: Some(items[3]),
        restless: Some(items[4]),
        irritable: Some(items[5]),
        afraid: Some(items[6]),
    }
}

pub(super) fn submission(concern: &str, nlu: Option<NarrativeSignal>) -> IntakeSubmission {
    IntakeSubmission {
        phq9: phq9(0, [2, 2, 1, 2, 1, 1, 1, 0]),
        gad7: gad7([2, 2, 3, 2, 1, 1, 1]),
        narrative: NarrativeText {
            primary_concern: concern.to_string(),
            symptoms: Some("Difficulty sleeping, racing thoughts".to_string()),
            goals: Some("Learn coping strategies".to_string()),
        },
        nlu,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<AlertDraft>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<AlertDraft> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: AlertDraft) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: AlertDraft) -> Result<(), AlertError> {
        Err(AlertError::Transport("pager offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<TriageService<MemoryAlerts>>, Arc<MemoryAlerts>) {
    let alerts = Arc::new(MemoryAlerts::default());
    let service = Arc::new(TriageService::new(&TriagePolicy::default(), alerts.clone()));
    (service, alerts)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
