//! Date-handling checks over an agent prompt.
//!
//! The agent that calls the API builds the date and time fields itself, so a
//! prompt that never pins their formats is a common source of drift.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptAnalysis {
    pub has_date_handling_section: bool,
    pub mentions_iso_format: bool,
    pub mentions_24h_format: bool,
    pub mentions_exact_dates: bool,
    pub has_date_examples: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl PromptAnalysis {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run every date-handling check against `prompt`.
pub fn analyze_prompt(prompt: &str) -> PromptAnalysis {
    let lower = prompt.to_lowercase();
    let mut analysis = PromptAnalysis::default();

    analysis.has_date_handling_section =
        lower.contains("date_and_time_handling") || lower.contains("date handling");
    if !analysis.has_date_handling_section {
        analysis.issues.push("No dedicated date-handling section".to_string());
        analysis
            .recommendations
            .push("Add a <date_and_time_handling> section with explicit instructions".to_string());
    }

    analysis.mentions_iso_format = prompt.contains("YYYY-MM-DD") || prompt.contains("ISO");
    if !analysis.mentions_iso_format {
        analysis.issues.push("Does not require ISO dates (YYYY-MM-DD)".to_string());
        analysis
            .recommendations
            .push("State that dates must use ISO format: YYYY-MM-DD".to_string());
    }

    analysis.mentions_24h_format =
        prompt.contains("HH:MM") || prompt.contains("24-hour") || prompt.contains("24 hour");
    if !analysis.mentions_24h_format {
        analysis.issues.push("Does not require 24-hour times (HH:MM)".to_string());
        analysis
            .recommendations
            .push("State that times must use 24-hour format: HH:MM".to_string());
    }

    analysis.mentions_exact_dates = lower.contains("exact date") || lower.contains("calculate");
    if !analysis.mentions_exact_dates {
        analysis
            .issues
            .push("Does not instruct computing exact dates instead of relative terms".to_string());
        analysis
            .recommendations
            .push("Add: ALWAYS calculate exact dates, NEVER send relative terms like \"next Wednesday\"".to_string());
    }

    analysis.has_date_examples = contains_iso_date(prompt);
    if !analysis.has_date_examples {
        analysis
            .recommendations
            .push("Add correctly formatted date examples (e.g. 2026-02-05)".to_string());
    }

    analysis
}

/// Whether `text` contains a `dddd-dd-dd` run.
fn contains_iso_date(text: &str) -> bool {
    const SHAPE: &[u8; 10] = b"dddd-dd-dd";
    text.as_bytes().windows(SHAPE.len()).any(|w| {
        w.iter().zip(SHAPE).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            _ => b == s,
        })
    })
}
