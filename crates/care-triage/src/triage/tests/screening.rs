use super::common::*;
use crate::triage::screening::{
    Gad7Responses, Phq9Responses, ScreeningError, ScreeningScale, ScreeningTotals,
};

#[test]
fn totals_sum_answered_items() {
    let phq9 = phq9(2, [3, 3, 3, 3, 2, 2, 2, 2]);
    let gad7 = gad7([3, 3, 3, 3, 2, 2, 2]);

    let totals = ScreeningTotals::from_responses(&phq9, &gad7).expect("valid answers");

    assert_eq!(totals.depression_total, 22);
    assert_eq!(totals.anxiety_total, 18);
    assert_eq!(phq9.self_harm_item(), 2);
}

#[test]
fn blank_items_are_excluded_from_totals() {
    let phq9 = Phq9Responses {
        interest: Some(3),
        ..Phq9Responses::default()
    };

    let totals = ScreeningTotals::from_responses(&phq9, &Gad7Responses::default())
        .expect("partial answers accepted");

    assert_eq!(totals.depression_total, 3);
    assert_eq!(totals.anxiety_total, 0);
    assert_eq!(phq9.self_harm_item(), 0);
}

#[test]
fn rejects_item_above_scale_maximum() {
    let mut gad7 = gad7([1, 1, 1, 1, 1, 1, 1]);
    gad7.restless = Some(4);

    match ScreeningTotals::from_responses(&Phq9Responses::default(), &gad7) {
        Err(ScreeningError::ItemOutOfRange { scale, item, value }) => {
            assert_eq!(scale, ScreeningScale::Gad7);
            assert_eq!(item, "restless");
            assert_eq!(value, 4);
        }
        other => panic!("expected out-of-range item, got {other:?}"),
    }
}

#[test]
fn error_message_names_scale_and_item() {
    let phq9 = Phq9Responses {
        self_harm: Some(7),
        ..Phq9Responses::default()
    };

    let err = phq9.validate().expect_err("self-harm out of range");

    assert_eq!(
        err.to_string(),
        "PHQ-9 item 'self_harm' must be between 0 and 3, found 7"
    );
}

#[test]
fn responses_deserialize_with_missing_items() {
    let phq9: Phq9Responses =
        serde_json::from_value(serde_json::json!({ "depressed": 2, "self_harm": 1 }))
            .expect("partial document");

    assert_eq!(phq9.total(), 3);
    assert_eq!(phq9.interest, None);
}
