use serde::{Deserialize, Serialize};

/// Highest valid answer on either questionnaire ("nearly every day").
pub const MAX_ITEM_SCORE: u8 = 3;

/// Questionnaire a response item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningScale {
    Phq9,
    Gad7,
}

impl ScreeningScale {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningScale::Phq9 => "PHQ-9",
            ScreeningScale::Gad7 => "GAD-7",
        }
    }
}

/// Contract violations detected while reading questionnaire answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreeningError {
    #[error("{} item '{item}' must be between 0 and 3, found {value}", .scale.label())]
    ItemOutOfRange {
        scale: ScreeningScale,
        item: &'static str,
        value: u8,
    },
}

/// Depression questionnaire answers; unanswered items stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phq9Responses {
    pub interest: Option<u8>,
    pub depressed: Option<u8>,
    pub sleep: Option<u8>,
    pub fatigue: Option<u8>,
    pub appetite: Option<u8>,
    pub failure: Option<u8>,
    pub concentration: Option<u8>,
    pub movement: Option<u8>,
    pub self_harm: Option<u8>,
}

impl Phq9Responses {
    fn items(&self) -> [(&'static str, Option<u8>); 9] {
        [
            ("interest", self.interest),
            ("depressed", self.depressed),
            ("sleep", self.sleep),
            ("fatigue", self.fatigue),
            ("appetite", self.appetite),
            ("failure", self.failure),
            ("concentration", self.concentration),
            ("movement", self.movement),
            ("self_harm", self.self_harm),
        ]
    }

    pub fn validate(&self) -> Result<(), ScreeningError> {
        check_items(ScreeningScale::Phq9, &self.items())
    }

    /// Sum of the answered items.
    pub fn total(&self) -> u32 {
        sum_items(&self.items())
    }

    /// The self-harm item, read as "never" when it was left blank.
    pub fn self_harm_item(&self) -> u8 {
        self.self_harm.unwrap_or(0)
    }
}

/// Anxiety questionnaire answers; unanswered items stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gad7Responses {
    pub nervous: Option<u8>,
    pub control_worry: Option<u8>,
    pub worry_much: Option<u8>,
    pub trouble_relaxing: Option<u8>,
    pub restless: Option<u8>,
    pub irritable: Option<u8>,
    pub afraid: Option<u8>,
}

impl Gad7Responses {
    fn items(&self) -> [(&'static str, Option<u8>); 7] {
        [
            ("nervous", self.nervous),
            ("control_worry", self.control_worry),
            ("worry_much", self.worry_much),
            ("trouble_relaxing", self.trouble_relaxing),
            ("restless", self.restless),
            ("irritable", self.irritable),
            ("afraid", self.afraid),
        ]
    }

    pub fn validate(&self) -> Result<(), ScreeningError> {
        check_items(ScreeningScale::Gad7, &self.items())
    }

    pub fn total(&self) -> u32 {
        sum_items(&self.items())
    }
}

/// Questionnaire sums handed to the risk engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningTotals {
    pub depression_total: u32,
    pub anxiety_total: u32,
}

impl ScreeningTotals {
    pub fn from_responses(
        phq9: &Phq9Responses,
        gad7: &Gad7Responses,
    ) -> Result<Self, ScreeningError> {
        phq9.validate()?;
        gad7.validate()?;

        Ok(Self {
            depression_total: phq9.total(),
            anxiety_total: gad7.total(),
        })
    }
}

fn check_items(
    scale: ScreeningScale,
    items: &[(&'static str, Option<u8>)],
) -> Result<(), ScreeningError> {
    for &(item, value) in items {
        if let Some(value) = value {
            if value > MAX_ITEM_SCORE {
                return Err(ScreeningError::ItemOutOfRange { scale, item, value });
            }
        }
    }
    Ok(())
}

fn sum_items(items: &[(&'static str, Option<u8>)]) -> u32 {
    items
        .iter()
        .filter_map(|(_, value)| value.map(u32::from))
        .sum()
}
