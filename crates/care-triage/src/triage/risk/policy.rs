use serde::{Deserialize, Serialize};

use crate::config::RiskThresholds;

/// Discrete severity derived from the blended score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// High and critical cases need a provider who accepts high-risk clients.
    pub const fn is_elevated(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

/// Scheduling priority; set independently of [`RiskLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Standard,
    Urgent,
    Immediate,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Standard => "standard",
            Urgency::Urgent => "urgent",
            Urgency::Immediate => "immediate",
        }
    }
}

/// Minimum score forced by a safety signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFloor {
    CrisisPhrase,
    SelfHarm,
}

impl SafetyFloor {
    pub const fn minimum(self) -> f64 {
        match self {
            SafetyFloor::CrisisPhrase => 60.0,
            SafetyFloor::SelfHarm => 70.0,
        }
    }
}

/// Self-harm answers at or above this value ("more than half the days") are safety signals.
pub const SELF_HARM_SIGNAL: u8 = 2;

pub(crate) struct SafetySignals {
    pub crisis_phrase: bool,
    pub self_harm: bool,
}

impl SafetySignals {
    pub(crate) fn new(crisis_phrases: usize, self_harm_item: u8) -> Self {
        Self {
            crisis_phrase: crisis_phrases > 0,
            self_harm: self_harm_item >= SELF_HARM_SIGNAL,
        }
    }

    pub(crate) fn any(&self) -> bool {
        self.crisis_phrase || self.self_harm
    }
}

/// Raise `score` to each triggered floor; returns the floors that actually lifted it.
pub(crate) fn apply_floors(score: f64, signals: &SafetySignals) -> (f64, Vec<SafetyFloor>) {
    let mut floored = score;
    let mut applied = Vec::new();

    for (triggered, floor) in [
        (signals.crisis_phrase, SafetyFloor::CrisisPhrase),
        (signals.self_harm, SafetyFloor::SelfHarm),
    ] {
        if triggered && floored < floor.minimum() {
            floored = floor.minimum();
            applied.push(floor);
        }
    }

    (floored, applied)
}

pub(crate) fn classify(score: f64, thresholds: &RiskThresholds) -> RiskLevel {
    if score >= thresholds.critical {
        RiskLevel::Critical
    } else if score >= thresholds.high {
        RiskLevel::High
    } else if score >= thresholds.moderate {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Safety signals force `Immediate` whatever the score says.
pub(crate) fn recommend_urgency(
    score: f64,
    signals: &SafetySignals,
    thresholds: &RiskThresholds,
) -> Urgency {
    if signals.any() {
        Urgency::Immediate
    } else if score >= thresholds.high {
        Urgency::Urgent
    } else {
        Urgency::Standard
    }
}
