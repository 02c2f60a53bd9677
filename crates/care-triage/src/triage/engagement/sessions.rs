use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CaseEngagementHistory;

/// How many of the latest sentiment readings feed the trend.
const SENTIMENT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Attended,
    Cancelled,
    NoShow,
}

/// One scheduled session as recorded by the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub scheduled_on: NaiveDate,
    pub status: SessionStatus,
    #[serde(default)]
    pub sentiment: Option<f64>,
}

/// Summarize dated session records into the snapshot the predictor consumes.
///
/// Sessions dated after `as_of` count toward the status totals but not toward recency or the
/// sentiment trend.
pub fn history_from_sessions(
    sessions: &[SessionRecord],
    as_of: NaiveDate,
    avg_response_hours: Option<f64>,
) -> CaseEngagementHistory {
    let mut history = CaseEngagementHistory {
        avg_response_hours,
        ..CaseEngagementHistory::default()
    };

    for session in sessions {
        match session.status {
            SessionStatus::Attended => history.attended += 1,
            SessionStatus::Cancelled => history.cancelled += 1,
            SessionStatus::NoShow => history.no_show += 1,
        }
    }

    history.days_since_last_session = sessions
        .iter()
        .map(|session| session.scheduled_on)
        .filter(|date| *date <= as_of)
        .max()
        .map(|latest| (as_of - latest).num_days().max(0) as u32)
        .unwrap_or(0);

    let mut rated: Vec<&SessionRecord> = sessions
        .iter()
        .filter(|session| session.scheduled_on <= as_of)
        .filter(|session| session.sentiment.is_some_and(f64::is_finite))
        .collect();
    rated.sort_by_key(|session| session.scheduled_on);
    let recent: Vec<f64> = rated
        .iter()
        .rev()
        .take(SENTIMENT_WINDOW)
        .filter_map(|session| session.sentiment)
        .collect();
    if !recent.is_empty() {
        history.sentiment_trend = Some(recent.iter().sum::<f64>() / recent.len() as f64);
    }

    history
}
