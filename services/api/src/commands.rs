use crate::infra::{read_json_file, InMemoryAlertPublisher};
use care_triage::config::TriagePolicy;
use care_triage::error::AppError;
use care_triage::triage::engagement::{history_from_sessions, SessionRecord};
use care_triage::triage::matching::read_roster;
use care_triage::triage::{
    AlertDraft, CaseEngagementHistory, CaseProfile, IntakeAssessment, IntakeSubmission,
    MatchCandidate, PredictionReport, RecommendRequest, TriageService, DEFAULT_TOP_N,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Intake submission JSON (questionnaires plus narrative)
    #[arg(long)]
    pub(crate) intake: PathBuf,
    /// Print the full assessment as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Case profile JSON
    #[arg(long)]
    pub(crate) case: PathBuf,
    /// Provider roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Number of candidates to return
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub(crate) top_n: usize,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Engagement snapshot JSON, or `{"sessions": [...]}` with dated session records
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Reference date for session recency (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) json: bool,
}

/// Either a precomputed snapshot or raw session records to summarize.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HistoryDocument {
    Sessions {
        sessions: Vec<SessionRecord>,
        #[serde(default)]
        as_of: Option<NaiveDate>,
        #[serde(default)]
        avg_response_hours: Option<f64>,
    },
    Snapshot(CaseEngagementHistory),
}

impl HistoryDocument {
    pub(crate) fn into_history(self, as_of_override: Option<NaiveDate>) -> CaseEngagementHistory {
        match self {
            HistoryDocument::Sessions {
                sessions,
                as_of,
                avg_response_hours,
            } => {
                let as_of = as_of_override
                    .or(as_of)
                    .unwrap_or_else(|| Local::now().date_naive());
                history_from_sessions(&sessions, as_of, avg_response_hours)
            }
            HistoryDocument::Snapshot(history) => history,
        }
    }
}

pub(crate) fn cli_service() -> Result<
    (
        TriageService<InMemoryAlertPublisher>,
        Arc<InMemoryAlertPublisher>,
    ),
    AppError,
> {
    let policy = TriagePolicy::from_env()?;
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    Ok((TriageService::new(&policy, alerts.clone()), alerts))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let submission: IntakeSubmission = read_json_file(&args.intake)?;
    let (service, _alerts) = cli_service()?;
    let outcome = service.assess_intake(submission)?;

    if args.json {
        print_json(&outcome)?;
    } else {
        render_assessment(&outcome);
    }
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let case: CaseProfile = read_json_file(&args.case)?;
    let roster = read_roster(&args.roster)?;
    let (service, _alerts) = cli_service()?;

    let request = RecommendRequest {
        case,
        roster,
        top_n: args.top_n,
    };
    let ranked = service.recommend(&request);

    if args.json {
        print_json(&ranked)?;
    } else {
        render_matches(&request.case, request.roster.len(), &ranked);
    }
    Ok(())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let document: HistoryDocument = read_json_file(&args.history)?;
    let history = document.into_history(args.as_of);
    let (service, _alerts) = cli_service()?;
    let report = service.predict(&history)?;

    if args.json {
        print_json(&report)?;
    } else {
        render_prediction(&history, &report);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn render_assessment(outcome: &IntakeAssessment) {
    let assessment = &outcome.assessment;
    println!(
        "PHQ-9 total {} | GAD-7 total {} | self-harm item {}",
        outcome.totals.depression_total, outcome.totals.anxiety_total, outcome.self_harm_item
    );
    println!(
        "Risk score {:.2}/100 -> {} (urgency {})",
        assessment.overall_score,
        assessment.risk_level.label(),
        assessment.urgency.label()
    );
    println!(
        "Components: depression {:.0} | anxiety {:.0} | sentiment {:.0} | crisis phrases {:.0} | self-harm {:.0}",
        assessment.components.depression,
        assessment.components.anxiety,
        assessment.components.sentiment,
        assessment.components.crisis_phrase,
        assessment.components.self_harm
    );
    if !outcome.crisis_phrases.is_empty() {
        let phrases: Vec<&str> = outcome.crisis_phrases.iter().map(String::as_str).collect();
        println!("Crisis phrases: {}", phrases.join(", "));
    }
    for floor in &assessment.floors_applied {
        println!("Safety floor applied: {:?} ({:.0})", floor, floor.minimum());
    }
    render_alerts(&outcome.alerts);
}

pub(crate) fn render_matches(case: &CaseProfile, roster_size: usize, ranked: &[MatchCandidate]) {
    let risk = case
        .risk_level
        .map(|level| level.label())
        .unwrap_or("unassessed");
    println!(
        "Top {} of {} providers for '{}' (risk {}, language {})",
        ranked.len(),
        roster_size,
        case.primary_concern,
        risk,
        case.preferred_language
    );
    for (rank, candidate) in ranked.iter().enumerate() {
        println!(
            "{}. {} [{}] score {:.2}",
            rank + 1,
            candidate.provider.name,
            candidate.provider.id.0,
            candidate.score
        );
        for reason in &candidate.reasoning {
            println!("   - {reason}");
        }
    }
}

pub(crate) fn render_prediction(history: &CaseEngagementHistory, report: &PredictionReport) {
    let prediction = &report.prediction;
    println!(
        "Sessions: {} attended | {} cancelled | {} no-show | last session {} days ago",
        history.attended, history.cancelled, history.no_show, history.days_since_last_session
    );
    println!(
        "Dropout probability {:.2}% (confidence {:.0}%, model {})",
        prediction.probability, prediction.confidence, prediction.model_version
    );
    if prediction.risk_factors.is_empty() {
        println!("Risk factors: none");
    } else {
        println!("Risk factors:");
        for factor in &prediction.risk_factors {
            println!("- {factor}");
        }
    }
    if report.intervention_recommended {
        println!("Outreach recommended");
    }
}

pub(crate) fn render_alerts(alerts: &[AlertDraft]) {
    if alerts.is_empty() {
        println!("Staff alerts: none");
        return;
    }
    println!("Staff alerts:");
    for alert in alerts {
        println!(
            "- [{:?}] {}: {}",
            alert.severity, alert.title, alert.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_document_is_summarized() {
        let document: HistoryDocument = serde_json::from_value(serde_json::json!({
            "sessions": [
                { "scheduled_on": "2025-02-01", "status": "attended", "sentiment": 0.2 },
                { "scheduled_on": "2025-02-08", "status": "no_show" }
            ],
            "as_of": "2025-02-18",
            "avg_response_hours": 12.0
        }))
        .expect("session document");

        let history = document.into_history(None);

        assert_eq!(history.attended, 1);
        assert_eq!(history.no_show, 1);
        assert_eq!(history.days_since_last_session, 10);
        assert_eq!(history.avg_response_hours, Some(12.0));
    }

    #[test]
    fn as_of_flag_overrides_document_date() {
        let document: HistoryDocument = serde_json::from_value(serde_json::json!({
            "sessions": [{ "scheduled_on": "2025-02-01", "status": "attended" }],
            "as_of": "2025-02-18"
        }))
        .expect("session document");

        let history =
            document.into_history(Some(NaiveDate::from_ymd_opt(2025, 3, 3).expect("date")));

        assert_eq!(history.days_since_last_session, 30);
    }

    #[test]
    fn snapshot_document_passes_through() {
        let document: HistoryDocument = serde_json::from_value(serde_json::json!({
            "attended": 0,
            "cancelled": 2,
            "days_since_last_session": 40
        }))
        .expect("snapshot document");

        let history = document.into_history(None);

        assert_eq!(history.cancelled, 2);
        assert_eq!(history.days_since_last_session, 40);
    }
}
