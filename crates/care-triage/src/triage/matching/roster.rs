use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{ProviderId, ProviderProfile};

/// Failure while importing a provider roster export.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read provider roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid provider roster CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub fn read_roster<P: AsRef<Path>>(path: P) -> Result<Vec<ProviderProfile>, RosterImportError> {
    let file = std::fs::File::open(path)?;
    parse_roster(file)
}

/// Parse `id,name,max_caseload,current_caseload,specialties,languages,accepts_high_risk,years_experience`.
///
/// List columns are `;`-separated; a blank experience cell means unknown.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<ProviderProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut roster = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        roster.push(row.into_profile());
    }

    Ok(roster)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    max_caseload: u32,
    current_caseload: u32,
    #[serde(default)]
    specialties: String,
    #[serde(default)]
    languages: String,
    #[serde(deserialize_with = "flexible_bool")]
    accepts_high_risk: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    years_experience: Option<u32>,
}

impl RosterRow {
    fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            id: ProviderId(self.id),
            name: self.name,
            max_caseload: self.max_caseload,
            current_caseload: self.current_caseload,
            specialties: split_list(&self.specialties),
            languages: split_list(&self.languages),
            accepts_high_risk: self.accepts_high_risk,
            years_experience: self.years_experience,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected yes/no for accepts_high_risk, found '{other}'"
        ))),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u32>().map(Some).map_err(serde::de::Error::custom),
    }
}
