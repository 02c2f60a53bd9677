use chrono::NaiveDate;

use super::common::*;
use crate::triage::engagement::{
    history_from_sessions, CaseEngagementHistory, DropoutModel, HeuristicDropoutModel,
    SessionRecord, SessionStatus, HEURISTIC_MODEL_VERSION,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn never_attended_case_with_cancellations() {
    let history = CaseEngagementHistory {
        attended: 0,
        cancelled: 2,
        no_show: 0,
        days_since_last_session: 40,
        sentiment_trend: Some(0.1),
        avg_response_hours: Some(6.0),
    };

    let prediction = HeuristicDropoutModel.predict(&history);

    assert_eq!(prediction.probability, 55.0);
    assert_eq!(prediction.confidence, 80.0);
    assert_eq!(
        prediction.risk_factors,
        vec![
            "no session in 40 days",
            "early cancellation pattern",
            "never attended a session",
        ]
    );
    assert_eq!(prediction.model_version, HEURISTIC_MODEL_VERSION);
    assert!(!prediction.intervention_recommended());
}

#[test]
fn strong_attendance_adds_baseline_without_factor() {
    let prediction = HeuristicDropoutModel.predict(&history(9, 1, 0, 7));

    assert_eq!(prediction.probability, 5.0);
    assert!(prediction.risk_factors.is_empty());
    assert_eq!(prediction.confidence, 100.0);
}

#[test]
fn additional_no_shows_never_lower_probability() {
    for attended in 0..4 {
        for cancelled in 0..4 {
            let mut previous = None;
            for no_show in 0..6 {
                let probability = HeuristicDropoutModel
                    .predict(&history(attended, cancelled, no_show, 10))
                    .probability;
                if let Some(previous) = previous {
                    assert!(
                        probability >= previous,
                        "attended={attended} cancelled={cancelled} no_show={no_show}"
                    );
                }
                previous = Some(probability);
            }
        }
    }
}

#[test]
fn probability_is_capped_at_one_hundred() {
    let history = CaseEngagementHistory {
        attended: 1,
        cancelled: 2,
        no_show: 5,
        days_since_last_session: 60,
        sentiment_trend: Some(-0.9),
        avg_response_hours: Some(100.0),
    };

    let prediction = HeuristicDropoutModel.predict(&history);

    assert_eq!(prediction.probability, 100.0);
    assert_eq!(prediction.risk_factors.len(), 6);
    assert_eq!(prediction.risk_factors[0], "low attendance rate (<50%)");
    assert_eq!(prediction.risk_factors[1], "high no-show rate (>30%)");
    assert!(prediction.intervention_recommended());
}

#[test]
fn moderate_signals_use_lower_tiers() {
    let history = CaseEngagementHistory {
        attended: 6,
        cancelled: 2,
        no_show: 2,
        days_since_last_session: 20,
        sentiment_trend: Some(-0.1),
        avg_response_hours: Some(24.0),
    };

    let prediction = HeuristicDropoutModel.predict(&history);

    // 25 attendance + 15 no-shows + 10 gap + 5 sentiment
    assert_eq!(prediction.probability, 55.0);
    assert_eq!(
        prediction.risk_factors,
        vec![
            "moderate attendance rate",
            "some no-shows",
            "session gap over two weeks",
            "slightly negative sentiment",
        ]
    );
}

#[test]
fn empty_history_has_reduced_confidence() {
    let prediction = HeuristicDropoutModel.predict(&CaseEngagementHistory::default());

    assert_eq!(prediction.probability, 0.0);
    assert!(prediction.risk_factors.is_empty());
    assert_eq!(prediction.confidence, 40.0);
}

#[test]
fn confidence_stays_within_bounds() {
    for total in 0..5 {
        let history = CaseEngagementHistory {
            attended: total,
            sentiment_trend: None,
            avg_response_hours: None,
            ..CaseEngagementHistory::default()
        };
        let confidence = HeuristicDropoutModel.predict(&history).confidence;
        assert!((20.0..=100.0).contains(&confidence), "total={total}");
    }
}

#[test]
fn non_finite_optional_inputs_are_ignored() {
    let mut history = history(5, 0, 0, 3);
    history.sentiment_trend = Some(f64::NAN);
    history.avg_response_hours = Some(f64::INFINITY);

    let prediction = HeuristicDropoutModel.predict(&history);

    assert_eq!(prediction.probability, 5.0);
    assert!(prediction.risk_factors.is_empty());
    assert_eq!(prediction.confidence, 80.0);
}

#[test]
fn sessions_summarize_into_history() {
    let sessions = vec![
        SessionRecord {
            scheduled_on: date(2024, 3, 1),
            status: SessionStatus::Attended,
            sentiment: Some(0.4),
        },
        SessionRecord {
            scheduled_on: date(2024, 3, 8),
            status: SessionStatus::NoShow,
            sentiment: None,
        },
        SessionRecord {
            scheduled_on: date(2024, 3, 15),
            status: SessionStatus::Attended,
            sentiment: Some(-0.2),
        },
        SessionRecord {
            scheduled_on: date(2024, 3, 22),
            status: SessionStatus::Attended,
            sentiment: Some(-0.5),
        },
        SessionRecord {
            scheduled_on: date(2024, 2, 20),
            status: SessionStatus::Cancelled,
            sentiment: Some(0.9),
        },
        SessionRecord {
            scheduled_on: date(2024, 5, 1),
            status: SessionStatus::Cancelled,
            sentiment: None,
        },
    ];

    let history = history_from_sessions(&sessions, date(2024, 4, 1), Some(30.0));

    assert_eq!(history.attended, 3);
    assert_eq!(history.cancelled, 2);
    assert_eq!(history.no_show, 1);
    assert_eq!(history.days_since_last_session, 10);
    let trend = history.sentiment_trend.expect("trend computed");
    assert!((trend - (-0.1)).abs() < 1e-9);
    assert_eq!(history.avg_response_hours, Some(30.0));
}

#[test]
fn sessions_without_ratings_leave_trend_unset() {
    let sessions = vec![SessionRecord {
        scheduled_on: date(2024, 1, 10),
        status: SessionStatus::Attended,
        sentiment: None,
    }];

    let history = history_from_sessions(&sessions, date(2024, 1, 10), None);

    assert_eq!(history.days_since_last_session, 0);
    assert_eq!(history.sentiment_trend, None);
}

#[test]
fn sessions_after_as_of_do_not_feed_sentiment_trend() {
    let sessions = vec![
        SessionRecord {
            scheduled_on: date(2024, 6, 3),
            status: SessionStatus::Attended,
            sentiment: Some(0.5),
        },
        SessionRecord {
            scheduled_on: date(2024, 6, 20),
            status: SessionStatus::Attended,
            sentiment: Some(-0.9),
        },
    ];

    let history = history_from_sessions(&sessions, date(2024, 6, 10), None);

    assert_eq!(history.attended, 2);
    assert_eq!(history.days_since_last_session, 7);
    assert_eq!(history.sentiment_trend, Some(0.5));
}
