use super::CaseEngagementHistory;

/// Running total of triggered disengagement factors, in evaluation order.
pub(crate) struct FactorLedger {
    probability: f64,
    factors: Vec<String>,
}

impl FactorLedger {
    fn new() -> Self {
        Self {
            probability: 0.0,
            factors: Vec::new(),
        }
    }

    fn add(&mut self, points: f64, description: impl Into<String>) {
        self.probability += points;
        self.factors.push(description.into());
    }

    fn add_silent(&mut self, points: f64) {
        self.probability += points;
    }

    pub(crate) fn finish(self) -> (f64, Vec<String>) {
        (self.probability.min(100.0), self.factors)
    }
}

pub(crate) fn accumulate(history: &CaseEngagementHistory) -> FactorLedger {
    let mut ledger = FactorLedger::new();
    let total = history.total_sessions();

    // With nothing attended, "never attended" below carries the signal instead.
    if total > 0 && history.attended > 0 {
        let attendance_rate = f64::from(history.attended) / f64::from(total);
        if attendance_rate < 0.5 {
            ledger.add(40.0, "low attendance rate (<50%)");
        } else if attendance_rate < 0.75 {
            ledger.add(25.0, "moderate attendance rate");
        } else {
            ledger.add_silent(5.0);
        }
    }

    if history.no_show > 0 {
        let no_show_rate = f64::from(history.no_show) / f64::from(total.max(1));
        if no_show_rate > 0.3 {
            ledger.add(25.0, "high no-show rate (>30%)");
        } else if no_show_rate > 0.1 {
            ledger.add(15.0, "some no-shows");
        }
    }

    let days = history.days_since_last_session;
    if days > 30 {
        ledger.add(20.0, format!("no session in {days} days"));
    } else if days > 14 {
        ledger.add(10.0, "session gap over two weeks");
    }

    if let Some(trend) = history.sentiment_trend.filter(|trend| trend.is_finite()) {
        if trend < -0.3 {
            ledger.add(10.0, "declining sentiment");
        } else if trend < 0.0 {
            ledger.add(5.0, "slightly negative sentiment");
        }
    }

    if let Some(hours) = history.avg_response_hours.filter(|hours| hours.is_finite()) {
        if hours > 72.0 {
            ledger.add(5.0, "slow response to communications");
        }
    }

    // No-shows are left out of the early window so extra no-shows never lower the estimate.
    let early_window = history.attended + history.cancelled;
    if early_window <= 3 && history.cancelled > 0 {
        ledger.add(15.0, "early cancellation pattern");
    }

    if history.attended == 0 && total > 0 {
        ledger.add(20.0, "never attended a session");
    }

    ledger
}
