use std::sync::Arc;

use super::common::*;
use crate::config::TriagePolicy;
use crate::triage::alerts::{AlertKind, AlertSeverity};
use crate::triage::engagement::{CaseEngagementHistory, DropoutModel, DropoutPredictionResult};
use crate::triage::narrative::NarrativeSignal;
use crate::triage::risk::{RiskLevel, SafetyFloor, Urgency};
use crate::triage::service::{RecommendRequest, TriageService, TriageServiceError};

#[test]
fn routine_intake_publishes_no_alerts() {
    let (service, alerts) = build_service();

    let outcome = service
        .assess_intake(submission("Panic attacks and constant worry", None))
        .expect("intake assessed");

    assert_eq!(outcome.totals.depression_total, 10);
    assert_eq!(outcome.totals.anxiety_total, 12);
    assert_eq!(outcome.assessment.overall_score, 27.5);
    assert_eq!(outcome.assessment.risk_level, RiskLevel::Low);
    assert!(outcome.crisis_phrases.is_empty());
    assert!(outcome.alerts.is_empty());
    assert!(alerts.events().is_empty());
}

#[test]
fn crisis_language_in_narrative_raises_alerts() {
    let (service, alerts) = build_service();

    let outcome = service
        .assess_intake(submission("I feel hopeless most days", None))
        .expect("intake assessed");

    assert_eq!(outcome.crisis_phrases, phrases(&["hopeless"]));
    assert_eq!(outcome.assessment.overall_score, 60.0);
    assert_eq!(outcome.assessment.urgency, Urgency::Immediate);
    assert_eq!(
        outcome.assessment.floors_applied,
        vec![SafetyFloor::CrisisPhrase]
    );

    let events = alerts.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, AlertKind::HighRisk);
    assert_eq!(events[0].severity, AlertSeverity::High);
    assert_eq!(events[0].title, "High risk case");
    assert_eq!(events[1].kind, AlertKind::CrisisPhrase);
    assert_eq!(events[1].severity, AlertSeverity::Critical);
    assert_eq!(events, outcome.alerts);
}

#[test]
fn collaborator_signal_feeds_sentiment() {
    let (service, _alerts) = build_service();
    let signal = NarrativeSignal {
        sentiment: 1.0,
        crisis_phrases: Default::default(),
    };

    let outcome = service
        .assess_intake(submission("Panic attacks and constant worry", Some(signal)))
        .expect("intake assessed");

    assert_eq!(outcome.assessment.components.sentiment, 10.0);
    assert_eq!(outcome.assessment.overall_score, 22.25);
}

#[test]
fn invalid_answers_are_rejected_before_scoring() {
    let (service, alerts) = build_service();
    let mut submission = submission("I feel hopeless", None);
    submission.phq9.sleep = Some(5);

    match service.assess_intake(submission) {
        Err(TriageServiceError::Screening(_)) => {}
        other => panic!("expected screening error, got {other:?}"),
    }
    assert!(alerts.events().is_empty());
}

#[test]
fn alert_transport_failure_surfaces() {
    let service = TriageService::new(&TriagePolicy::default(), Arc::new(OfflineAlerts));

    match service.assess_intake(submission("I feel hopeless", None)) {
        Err(TriageServiceError::Alert(err)) => {
            assert!(err.to_string().contains("pager offline"));
        }
        other => panic!("expected alert error, got {other:?}"),
    }
}

#[test]
fn recommend_uses_policy_specialties() {
    let (service, _alerts) = build_service();
    let request = RecommendRequest {
        case: case(Some(RiskLevel::High), "trauma after an accident", "English"),
        roster: vec![
            provider("generalist", 10, 2, &[], &["English"], true, Some(12)),
            provider("trauma", 10, 2, &["trauma"], &["English"], true, Some(4)),
            provider("full", 10, 10, &["trauma"], &["English"], true, Some(20)),
        ],
        top_n: 2,
    };

    let ranked = service.recommend(&request);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].provider.id.0, "trauma");
    assert_eq!(ranked[0].score, 87.0);
    assert_eq!(ranked[1].provider.id.0, "generalist");
}

#[test]
fn high_dropout_risk_publishes_outreach_alert() {
    let (service, alerts) = build_service();
    let history = CaseEngagementHistory {
        attended: 1,
        cancelled: 1,
        no_show: 3,
        days_since_last_session: 35,
        sentiment_trend: Some(-0.5),
        avg_response_hours: None,
    };

    let report = service.predict(&history).expect("prediction");

    assert!(report.intervention_recommended);
    let alert = report.alert.expect("outreach alert");
    assert_eq!(alert.kind, AlertKind::DropoutRisk);
    assert_eq!(alerts.events(), vec![alert]);
}

#[test]
fn steady_engagement_does_not_alert() {
    let (service, alerts) = build_service();

    let report = service.predict(&history(8, 1, 0, 6)).expect("prediction");

    assert!(!report.intervention_recommended);
    assert!(report.alert.is_none());
    assert!(alerts.events().is_empty());
}

struct FixedModel;

impl DropoutModel for FixedModel {
    fn predict(&self, _history: &CaseEngagementHistory) -> DropoutPredictionResult {
        DropoutPredictionResult {
            probability: 72.5,
            risk_factors: vec!["model flagged".to_string()],
            confidence: 90.0,
            model_version: self.version().to_string(),
        }
    }

    fn version(&self) -> &str {
        "2.0.0-trained"
    }
}

#[test]
fn dropout_model_is_replaceable() {
    let alerts = Arc::new(MemoryAlerts::default());
    let service =
        TriageService::with_model(&TriagePolicy::default(), alerts.clone(), Arc::new(FixedModel));

    let report = service
        .predict(&CaseEngagementHistory::default())
        .expect("prediction");

    assert_eq!(report.prediction.model_version, "2.0.0-trained");
    assert!(report.intervention_recommended);
    assert_eq!(alerts.events().len(), 1);
}
