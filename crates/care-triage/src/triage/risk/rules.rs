/// Inclusive questionnaire-total band mapped to a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RiskBand {
    pub min: u32,
    pub max: u32,
    pub risk: f64,
}

const fn band(min: u32, max: u32, risk: f64) -> RiskBand {
    RiskBand { min, max, risk }
}

pub(crate) const DEPRESSION_BANDS: [RiskBand; 5] = [
    band(0, 4, 5.0),
    band(5, 9, 15.0),
    band(10, 14, 35.0),
    band(15, 19, 60.0),
    band(20, 27, 85.0),
];

pub(crate) const ANXIETY_BANDS: [RiskBand; 4] = [
    band(0, 4, 5.0),
    band(5, 9, 15.0),
    band(10, 14, 40.0),
    band(15, 21, 70.0),
];

/// Mid-range risk used whenever an input falls outside every known band.
pub const FALLBACK_RISK: f64 = 50.0;

pub(crate) const DEPRESSION_WEIGHT: f64 = 0.25;
pub(crate) const ANXIETY_WEIGHT: f64 = 0.20;
pub(crate) const SENTIMENT_WEIGHT: f64 = 0.15;
pub(crate) const CRISIS_PHRASE_WEIGHT: f64 = 0.25;
pub(crate) const SELF_HARM_WEIGHT: f64 = 0.15;

fn band_risk(total: u32, bands: &[RiskBand]) -> f64 {
    bands
        .iter()
        .find(|band| band.min <= total && total <= band.max)
        .map(|band| band.risk)
        .unwrap_or(FALLBACK_RISK)
}

pub fn depression_risk(total: u32) -> f64 {
    band_risk(total, &DEPRESSION_BANDS)
}

pub fn anxiety_risk(total: u32) -> f64 {
    band_risk(total, &ANXIETY_BANDS)
}

/// Linear map: -1.0 -> 80, 0.0 -> 45, 1.0 -> 10.
pub fn sentiment_risk(sentiment: f64) -> f64 {
    if !sentiment.is_finite() {
        return FALLBACK_RISK;
    }
    (45.0 - sentiment * 35.0).clamp(0.0, 100.0)
}

pub fn crisis_phrase_risk(detected: usize) -> f64 {
    match detected {
        0 => 10.0,
        1 => 60.0,
        2 => 75.0,
        _ => 90.0,
    }
}

pub fn self_harm_risk(item: u8) -> f64 {
    match item {
        0 => 10.0,
        1 => 50.0,
        2 => 75.0,
        3 => 95.0,
        _ => FALLBACK_RISK,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
