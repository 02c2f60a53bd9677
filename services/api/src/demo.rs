use crate::commands::{cli_service, render_alerts, render_assessment, render_matches, render_prediction};
use care_triage::error::AppError;
use care_triage::triage::engagement::{history_from_sessions, SessionRecord, SessionStatus};
use care_triage::triage::matching::{parse_roster, ProviderProfile};
use care_triage::triage::{
    CaseProfile, Gad7Responses, IntakeSubmission, NarrativeText, Phq9Responses,
    RecommendRequest, DEFAULT_TOP_N,
};
use chrono::{Local, NaiveDate};
use clap::Args;

const DEMO_ROSTER: &str = "\
id,name,max_caseload,current_caseload,specialties,languages,accepts_high_risk,years_experience
prov-101,Dr. Amara Okafor,25,14,depression;trauma,English;Igbo,yes,12
prov-102,Dr. Lucia Herrera,20,19,anxiety;depression,English;Spanish,yes,8
prov-103,Jordan Pike LCSW,30,9,anxiety;couples,English,no,4
prov-104,Dr. Wen Li,18,18,depression;eating-disorders,English;Mandarin,yes,17
prov-105,Sam Whitfield LPC,22,6,addiction,English,yes,
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the engagement follow-up (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Number of provider recommendations to print.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub(crate) top_n: usize,
    /// Skip the engagement follow-up portion of the demo.
    #[arg(long)]
    pub(crate) skip_follow_up: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        top_n,
        skip_follow_up,
    } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let (service, alerts) = cli_service()?;
    let roster = parse_roster(DEMO_ROSTER.as_bytes())?;

    println!("Care triage demo (synthetic client, no PHI)");
    println!("\nIntake screening");
    let outcome = service.assess_intake(demo_submission())?;
    render_assessment(&outcome);

    println!("\nProvider matching");
    let request = RecommendRequest {
        case: CaseProfile {
            risk_level: Some(outcome.assessment.risk_level),
            primary_concern: "Depression and panic after losing my job".to_string(),
            preferred_language: "English".to_string(),
            preferred_provider_gender: None,
        },
        roster,
        top_n,
    };
    let ranked = service.recommend(&request);
    render_matches(&request.case, request.roster.len(), &ranked);
    render_capacity(&request.roster);

    if skip_follow_up {
        return Ok(());
    }

    println!("\nEngagement follow-up (as of {as_of})");
    let history = history_from_sessions(&demo_sessions(as_of), as_of, Some(96.0));
    let report = service.predict(&history)?;
    render_prediction(&history, &report);

    println!("\nAlert log");
    render_alerts(&alerts.events());

    Ok(())
}

fn demo_submission() -> IntakeSubmission {
    IntakeSubmission {
        phq9: Phq9Responses {
            interest: Some(2),
            depressed: Some(3),
            sleep: Some(3),
            fatigue: Some(2),
            appetite: Some(1),
            failure: Some(3),
            concentration: Some(2),
            movement: Some(1),
            self_harm: Some(1),
        },
        gad7: Gad7Responses {
            nervous: Some(3),
            control_worry: Some(2),
            worry_much: Some(3),
            trouble_relaxing: Some(2),
            restless: Some(1),
            irritable: Some(2),
            afraid: Some(2),
        },
        narrative: NarrativeText {
            primary_concern: "Depression and panic after losing my job".to_string(),
            symptoms: Some("Can't sleep, feel worthless most mornings".to_string()),
            goals: Some("Get back to a routine".to_string()),
        },
        nlu: None,
    }
}

fn demo_sessions(as_of: NaiveDate) -> Vec<SessionRecord> {
    let session = |days_ago: i64, status: SessionStatus, sentiment: Option<f64>| SessionRecord {
        scheduled_on: as_of - chrono::Duration::days(days_ago),
        status,
        sentiment,
    };

    vec![
        session(63, SessionStatus::Attended, Some(0.1)),
        session(56, SessionStatus::Cancelled, None),
        session(49, SessionStatus::NoShow, None),
        session(42, SessionStatus::Attended, Some(-0.3)),
        session(35, SessionStatus::NoShow, None),
    ]
}

fn render_capacity(roster: &[ProviderProfile]) {
    let open = roster.iter().filter(|provider| provider.has_capacity()).count();
    println!("Roster capacity: {open} of {} providers accepting cases", roster.len());
    for provider in roster.iter().filter(|provider| !provider.has_capacity()) {
        println!(
            "- {} at capacity ({:.0}% utilized)",
            provider.name,
            provider.utilization_percent()
        );
    }
}
