//! Requirements Extraction
//!
//! Distills raw operator text into a structured intent the SQL renderer
//! consumes. Deliberately simple pattern matching: the keyword "low"
//! selects ascending order, a 12-hour clock time like "2pm" or "2:30 pm"
//! becomes a 24-hour time hint, and "today" becomes a date hint for the
//! current local date.

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Requested ordering for the metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lowest values first
    Low,
}

/// Structured intent extracted from raw text
///
/// Immutable once produced; the renderer never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Metric the caller asked about
    pub metric: String,
    /// Ordering hint, if any
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Time-of-day hint in HH:MM:SS form
    #[serde(default)]
    pub time_hint: Option<String>,
    /// Date hint in YYYY-MM-DD form
    #[serde(default)]
    pub date_hint: Option<String>,
    /// The text the intent was extracted from
    pub original_text: String,
}

fn time_pattern() -> &'static Regex {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    TIME_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").expect("valid time pattern")
    })
}

/// Extract structured requirements from raw text
pub fn extract_requirements(raw_text: &str) -> Requirements {
    tracing::debug!(raw_text, "extracting requirements");

    let normalized = raw_text.trim();
    let lowered = normalized.to_lowercase();

    let direction = if lowered.contains("low") {
        Some(Direction::Low)
    } else {
        None
    };

    let time_hint = time_pattern().captures(normalized).and_then(|caps| {
        let hour: u32 = caps[1].parse().ok()?;
        if hour == 0 || hour > 12 {
            return None;
        }
        let minute: u32 = caps
            .get(2)
            .map(|m| m.as_str().parse())
            .transpose()
            .ok()?
            .unwrap_or(0);
        if minute > 59 {
            return None;
        }
        let hour = match (caps[3].to_lowercase().as_str(), hour) {
            ("pm", 12) => 12,
            ("pm", h) => h + 12,
            ("am", 12) => 0,
            (_, h) => h,
        };
        Some(format!("{:02}:{:02}:00", hour, minute))
    });

    let date_hint = if lowered.contains("today") {
        Some(Local::now().format("%Y-%m-%d").to_string())
    } else {
        None
    };

    let requirements = Requirements {
        metric: "hold".to_string(),
        direction,
        time_hint,
        date_hint,
        original_text: raw_text.to_string(),
    };

    tracing::debug!(?requirements, "extraction complete");
    requirements
}
