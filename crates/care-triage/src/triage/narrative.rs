use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::TriagePolicy;

/// Structured output of the language-understanding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeSignal {
    /// -1.0 (most distressed) to 1.0.
    pub sentiment: f64,
    #[serde(default)]
    pub crisis_phrases: BTreeSet<String>,
}

impl NarrativeSignal {
    pub fn neutral() -> Self {
        Self {
            sentiment: 0.0,
            crisis_phrases: BTreeSet::new(),
        }
    }

    pub fn has_crisis_phrases(&self) -> bool {
        !self.crisis_phrases.is_empty()
    }
}

impl Default for NarrativeSignal {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Free-text answers collected at intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeText {
    pub primary_concern: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
}

impl NarrativeText {
    pub fn combined(&self) -> String {
        let mut text = format!("Primary Concern: {}\n", self.primary_concern);
        if let Some(symptoms) = self.symptoms.as_deref().filter(|s| !s.trim().is_empty()) {
            text.push_str(&format!("Symptoms: {symptoms}\n"));
        }
        if let Some(goals) = self.goals.as_deref().filter(|g| !g.trim().is_empty()) {
            text.push_str(&format!("Goals: {goals}\n"));
        }
        text
    }
}

/// Deterministic keyword scan run alongside the language collaborator.
#[derive(Debug, Clone)]
pub struct CrisisScanner {
    keywords: Vec<(String, String)>,
}

impl CrisisScanner {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(Into::into)
            .filter(|keyword: &String| !keyword.trim().is_empty())
            .map(|keyword| {
                let needle = keyword.to_lowercase();
                (keyword, needle)
            })
            .collect();
        Self { keywords }
    }

    pub fn from_policy(policy: &TriagePolicy) -> Self {
        Self::new(policy.crisis_keywords.iter().cloned())
    }

    /// Configured keywords found anywhere in `text`, ignoring case.
    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|(_, needle)| haystack.contains(needle.as_str()))
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }

    /// Union of the collaborator's phrases and the local scan of `text`.
    ///
    /// Collaborator phrases are compared case-insensitively; one that names a configured keyword
    /// is stored as that keyword, anything else in lower case.
    pub fn merge(&self, signal: NarrativeSignal, text: &str) -> NarrativeSignal {
        let NarrativeSignal {
            sentiment,
            crisis_phrases: reported,
        } = signal;
        let mut crisis_phrases: BTreeSet<String> = reported
            .iter()
            .filter_map(|phrase| self.canonical(phrase))
            .collect();
        crisis_phrases.extend(self.scan(text));
        NarrativeSignal {
            sentiment,
            crisis_phrases,
        }
    }

    fn canonical(&self, phrase: &str) -> Option<String> {
        let needle = phrase.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let keyword = self
            .keywords
            .iter()
            .find(|(_, configured)| *configured == needle)
            .map(|(keyword, _)| keyword.clone());
        Some(keyword.unwrap_or(needle))
    }
}
