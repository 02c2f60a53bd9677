use super::CaseEngagementHistory;

pub(crate) const MIN_CONFIDENCE: f64 = 20.0;

/// Discount full confidence for every missing or thin input. Non-finite readings count as missing.
pub(crate) fn confidence(history: &CaseEngagementHistory) -> f64 {
    let mut confidence = 100.0;

    let total = history.total_sessions();
    if total == 0 {
        confidence -= 40.0;
    } else if total < 3 {
        confidence -= 20.0;
    }

    if !history.sentiment_trend.is_some_and(f64::is_finite) {
        confidence -= 10.0;
    }
    if !history.avg_response_hours.is_some_and(f64::is_finite) {
        confidence -= 10.0;
    }

    f64::max(confidence, MIN_CONFIDENCE)
}
