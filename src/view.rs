//! View models shared by the desktop layout, the mobile layout and the CLI.
//!
//! Nothing here mutates the store. Sorting is local to the view: the store
//! keeps catalog order and each view sorts its own copy.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::app_data::syllabus;
use crate::chapter::{Chapter, Status, Subject, Trend};
use crate::filter::FilterState;

/// Sort order over total question count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {} (expected asc or desc)", s)),
        }
    }
}

/// Chapters ordered by total questions. Ties keep their catalog order.
pub fn sorted(chapters: &[Chapter], order: SortOrder) -> Vec<&Chapter> {
    let mut sorted: Vec<&Chapter> = chapters.iter().collect();
    match order {
        SortOrder::Asc => sorted.sort_by_key(|c| c.total_questions()),
        SortOrder::Desc => sorted.sort_by_key(|c| Reverse(c.total_questions())),
    }
    sorted
}

/// Everything a chapter card displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub subject: Subject,
    pub title: String,
    pub class: String,
    pub unit: String,
    pub status: Status,
    pub weak: bool,
    pub latest_year: Option<String>,
    pub latest_count: u32,
    pub previous_year: Option<String>,
    pub previous_count: u32,
    /// None when the chapter has no year counts; an unchanged count is down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_up: Option<bool>,
    pub solved: u32,
    pub total: u64,
}

impl CardSummary {
    pub fn from_chapter(chapter: &Chapter) -> Self {
        let (latest, previous) = chapter.latest_two_years();
        // An unchanged count shows as a downward trend
        let trend_up = latest.map(|_| chapter.trend() == Trend::Up);
        Self {
            subject: chapter.subject,
            title: chapter.chapter.clone(),
            class: chapter.class.clone(),
            unit: chapter.unit.clone(),
            status: chapter.status,
            weak: chapter.is_weak(),
            latest_year: latest.map(|(year, _)| year.to_string()),
            latest_count: latest.map(|(_, count)| count).unwrap_or(0),
            previous_year: previous.map(|(year, _)| year.to_string()),
            previous_count: previous.map(|(_, count)| count).unwrap_or(0),
            trend_up,
            solved: chapter.question_solved,
            total: chapter.total_questions(),
        }
    }

    /// "2025: 8 Qs"
    pub fn latest_label(&self) -> String {
        year_label(self.latest_year.as_deref(), self.latest_count)
    }

    pub fn previous_label(&self) -> String {
        year_label(self.previous_year.as_deref(), self.previous_count)
    }

    /// "12/40 Qs"
    pub fn solved_label(&self) -> String {
        format!("{}/{} Qs", self.solved, self.total)
    }

    /// Arrow shown next to the latest year, if any
    pub fn trend_arrow(&self) -> Option<&'static str> {
        self.trend_up.map(|up| if up { "↑" } else { "↓" })
    }
}

fn year_label(year: Option<&str>, count: u32) -> String {
    format!("{}: {} Qs", year.unwrap_or(""), count)
}

/// The subject the dashboard header and option menus are built for.
///
/// Falls back to Physics when the subject filter is "all", a list, or a name
/// the catalog doesn't know.
pub fn dashboard_subject(filters: &FilterState) -> Subject {
    filters.selected_subject().unwrap_or(Subject::Physics)
}

/// Header title, e.g. "Physics PYQs"
pub fn header_title(subject: Subject) -> String {
    format!("{} PYQs", subject)
}

/// Header subtitle
pub fn header_subtitle(subject: Subject) -> String {
    format!("Chapter-wise Collection of {} PYQs", subject)
}

/// Unit options offered for a subject
pub fn unit_options(subject: Subject) -> &'static [String] {
    syllabus().units_for(subject)
}

/// Class options offered by the class menu
pub fn class_options() -> &'static [String] {
    &syllabus().exam.classes
}

/// "Showing all chapters (12)"
pub fn count_label(count: usize) -> String {
    format!("Showing all chapters ({})", count)
}
