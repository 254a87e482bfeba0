//! Chapter records and the figures derived from them.
//!
//! A [`Chapter`] is an immutable row of the catalog. Field names on the wire
//! are camelCase so catalog files can be shared with other tooling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Year (as a string, e.g. "2025") to number of questions asked that year
pub type YearWiseQuestionCount = BTreeMap<String, u32>;

/// Prefix carried by every class label in the catalog
pub const CLASS_PREFIX: &str = "Class ";

/// Subjects covered by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    /// Get all subjects in sidebar order
    pub fn all() -> &'static [Subject] {
        &[Subject::Physics, Subject::Chemistry, Subject::Mathematics]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::all()
            .iter()
            .copied()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| format!("Unknown subject: {}", s))
    }
}

/// Progress status of a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chapter of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub subject: Subject,
    /// Display name, used as the key within a subject
    pub chapter: String,
    /// Grade label, e.g. "Class 11"
    pub class: String,
    pub unit: String,
    #[serde(default)]
    pub year_wise_question_count: YearWiseQuestionCount,
    pub question_solved: u32,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_weak_chapter: Option<bool>,
}

/// Direction of the question count between the two most recent years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Chapter {
    /// Class label with the "Class " prefix removed ("Class 11" -> "11")
    pub fn class_number(&self) -> &str {
        self.class.strip_prefix(CLASS_PREFIX).unwrap_or(&self.class)
    }

    /// Only an explicit `true` marks a chapter as weak
    pub fn is_weak(&self) -> bool {
        self.is_weak_chapter == Some(true)
    }

    /// Sum of questions over every year. Widened so that large per-year
    /// counts cannot overflow.
    pub fn total_questions(&self) -> u64 {
        self.year_wise_question_count
            .values()
            .map(|&count| u64::from(count))
            .sum()
    }

    /// Years with their counts, most recent first.
    ///
    /// Years are ordered numerically; keys that are not numbers sort last.
    pub fn years_desc(&self) -> Vec<(&str, u32)> {
        let mut years: Vec<(&str, u32)> = self
            .year_wise_question_count
            .iter()
            .map(|(year, count)| (year.as_str(), *count))
            .collect();
        years.sort_by(|a, b| year_key(b.0).cmp(&year_key(a.0)));
        years
    }

    /// The two most recent years and their counts
    pub fn latest_two_years(&self) -> (Option<(&str, u32)>, Option<(&str, u32)>) {
        let years = self.years_desc();
        (years.first().copied(), years.get(1).copied())
    }

    /// Compare the latest year's count to the one before it.
    /// A missing year counts as zero questions.
    pub fn trend(&self) -> Trend {
        let (latest, previous) = self.latest_two_years();
        let latest = latest.map(|(_, count)| count).unwrap_or(0);
        let previous = previous.map(|(_, count)| count).unwrap_or(0);
        if latest > previous {
            Trend::Up
        } else if latest < previous {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    /// Stable icon slot for this chapter, chosen from its title
    pub fn icon_index(&self, icon_count: usize) -> usize {
        if icon_count == 0 {
            return 0;
        }
        let sum: u64 = self.chapter.encode_utf16().map(u64::from).sum();
        (sum % icon_count as u64) as usize
    }
}

fn year_key(year: &str) -> Option<i64> {
    year.parse().ok()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a chapter with the fields the filter looks at
    pub fn chapter(
        subject: Subject,
        name: &str,
        unit: &str,
        class: &str,
        status: Status,
        weak: Option<bool>,
    ) -> Chapter {
        Chapter {
            subject,
            chapter: name.to_string(),
            class: class.to_string(),
            unit: unit.to_string(),
            year_wise_question_count: YearWiseQuestionCount::new(),
            question_solved: 0,
            status,
            is_weak_chapter: weak,
        }
    }

    /// Attach year-wise counts to a chapter
    pub fn with_years(mut chapter: Chapter, years: &[(&str, u32)]) -> Chapter {
        chapter.year_wise_question_count = years
            .iter()
            .map(|(year, count)| (year.to_string(), *count))
            .collect();
        chapter
    }
}
