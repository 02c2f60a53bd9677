use care_triage::error::AppError;
use care_triage::triage::{AlertDraft, AlertError, AlertPublisher};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Most recent alerts retained by [`InMemoryAlertPublisher`]; older ones are dropped.
pub(crate) const ALERT_BACKLOG: usize = 256;

/// Keeps the latest published alerts in memory; stands in for the pager integration.
#[derive(Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<VecDeque<AlertDraft>>>,
    backlog: usize,
}

impl Default for InMemoryAlertPublisher {
    fn default() -> Self {
        Self::with_backlog(ALERT_BACKLOG)
    }
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: AlertDraft) -> Result<(), AlertError> {
        warn!(
            kind = ?alert.kind,
            severity = ?alert.severity,
            title = %alert.title,
            "staff alert raised"
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert store poisoned".to_string()))?;
        guard.push_back(alert);
        while guard.len() > self.backlog {
            guard.pop_front();
        }
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn with_backlog(backlog: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(backlog.min(ALERT_BACKLOG)))),
            backlog,
        }
    }

    pub(crate) fn events(&self) -> Vec<AlertDraft> {
        self.events
            .lock()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn read_json_file<T, P>(path: P) -> Result<T, AppError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
