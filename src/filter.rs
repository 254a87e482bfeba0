//! Filter state and the predicate evaluator.
//!
//! Outside this module every filter field is a plain string: either the
//! sentinel `"all"` or the selected value(s), comma-joined for multi-select
//! fields. Inside, a field is a [`Selection`]. Strings are decoded when a
//! field is set and encoded again only for display and output.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::chapter::{Chapter, Subject};

/// Sentinel meaning "no constraint on this field"
pub const ALL: &str = "all";

/// Separator between values of a multi-select field
pub const SEPARATOR: char = ',';

/// The five independent filter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Subject,
    Unit,
    Status,
    Class,
    Weak,
}

impl FilterField {
    pub fn all() -> &'static [FilterField] {
        &[
            FilterField::Subject,
            FilterField::Unit,
            FilterField::Status,
            FilterField::Class,
            FilterField::Weak,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Subject => "subject",
            FilterField::Unit => "unit",
            FilterField::Status => "status",
            FilterField::Class => "class",
            FilterField::Weak => "weak",
        }
    }

    /// Whether the field's string form is a comma-joined set
    pub fn is_multi_select(&self) -> bool {
        matches!(self, FilterField::Unit | FilterField::Class)
    }

    /// Decode a boundary string into a selection for this field
    pub fn decode(&self, raw: &str) -> Selection {
        if self.is_multi_select() {
            Selection::parse_multi(raw)
        } else {
            Selection::parse_single(raw)
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown filter field: {} (expected subject, unit, status, class or weak)", s))
    }
}

/// Values selected for one filter field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No constraint
    #[default]
    All,
    /// Chapter must match one of these values. Never empty.
    Values(Vec<String>),
}

impl Selection {
    /// A selection of exactly one value
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Values(vec![value.into()])
    }

    /// Build a selection from values, collapsing an empty list to `All`
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Selection::All
        } else {
            Selection::Values(values)
        }
    }

    /// Decode a comma-joined multi-select string.
    /// The sentinel is checked before splitting, so "all" is never a value.
    pub fn parse_multi(raw: &str) -> Self {
        if raw == ALL {
            Selection::All
        } else {
            Selection::Values(raw.split(SEPARATOR).map(str::to_string).collect())
        }
    }

    /// Decode a single-value string; commas are part of the value
    pub fn parse_single(raw: &str) -> Self {
        if raw == ALL {
            Selection::All
        } else {
            Selection::only(raw)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Selected values, empty for `All`
    pub fn values(&self) -> &[String] {
        match self {
            Selection::All => &[],
            Selection::Values(values) => values,
        }
    }

    /// Whether `value` is explicitly selected
    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// Whether a chapter value passes this selection
    pub fn admits(&self, value: &str) -> bool {
        self.is_all() || self.contains(value)
    }

    /// Add or remove one value, as a checkbox in a multi-select menu does.
    /// Removing the last value yields `All`.
    pub fn toggled(&self, value: &str, selected: bool) -> Selection {
        let mut values: Vec<String> = self.values().to_vec();
        if selected {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }
        Selection::from_values(values)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", SEPARATOR)?;
                    }
                    f.write_str(value)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Active filters. Mutated only through [`FilterState::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub subject: Selection,
    pub unit: Selection,
    pub status: Selection,
    pub class: Selection,
    pub weak: Selection,
}

impl Default for FilterState {
    /// Physics with every other field unconstrained
    fn default() -> Self {
        Self {
            subject: Selection::only(Subject::Physics.as_str()),
            unit: Selection::All,
            status: Selection::All,
            class: Selection::All,
            weak: Selection::All,
        }
    }
}

impl FilterState {
    /// Every field set to the sentinel
    pub fn unconstrained() -> Self {
        Self {
            subject: Selection::All,
            unit: Selection::All,
            status: Selection::All,
            class: Selection::All,
            weak: Selection::All,
        }
    }

    pub fn get(&self, field: FilterField) -> &Selection {
        match field {
            FilterField::Subject => &self.subject,
            FilterField::Unit => &self.unit,
            FilterField::Status => &self.status,
            FilterField::Class => &self.class,
            FilterField::Weak => &self.weak,
        }
    }

    fn get_mut(&mut self, field: FilterField) -> &mut Selection {
        match field {
            FilterField::Subject => &mut self.subject,
            FilterField::Unit => &mut self.unit,
            FilterField::Status => &mut self.status,
            FilterField::Class => &mut self.class,
            FilterField::Weak => &mut self.weak,
        }
    }

    /// Field in its boundary string form
    pub fn encoded(&self, field: FilterField) -> String {
        self.get(field).to_string()
    }

    /// Set a field from its boundary string form. The value is not validated.
    ///
    /// Setting `subject` resets unit, status, class and weak to "all" so no
    /// filter from the previous subject survives the switch.
    pub fn set(&mut self, field: FilterField, raw: &str) {
        self.set_selection(field, field.decode(raw));
    }

    /// Set a field from an already decoded selection, with the same subject reset
    pub fn set_selection(&mut self, field: FilterField, selection: Selection) {
        *self.get_mut(field) = selection;
        if field == FilterField::Subject {
            self.unit = Selection::All;
            self.status = Selection::All;
            self.class = Selection::All;
            self.weak = Selection::All;
        }
    }

    /// The subject currently selected, when it names a known subject
    pub fn selected_subject(&self) -> Option<Subject> {
        match self.subject.values() {
            [only] => only.parse().ok(),
            _ => None,
        }
    }
}

/// Whether a single chapter passes every filter
pub fn matches(chapter: &Chapter, filters: &FilterState) -> bool {
    filters.subject.admits(chapter.subject.as_str())
        && filters.unit.admits(&chapter.unit)
        && filters.status.admits(chapter.status.as_str())
        && filters.class.admits(chapter.class_number())
        && weak_admits(&filters.weak, chapter)
}

/// "true" keeps weak chapters, "false" keeps the rest; anything else keeps nothing
fn weak_admits(weak: &Selection, chapter: &Chapter) -> bool {
    match weak.values() {
        [] => true,
        [value] if value == "true" => chapter.is_weak(),
        [value] if value == "false" => !chapter.is_weak(),
        _ => false,
    }
}

/// Filter a chapter list. Pure: same inputs always give an equal result, and
/// input order is preserved.
pub fn evaluate(chapters: &[Chapter], filters: &FilterState) -> Vec<Chapter> {
    chapters
        .iter()
        .filter(|chapter| matches(chapter, filters))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::fixtures::chapter;
    use crate::chapter::Status;

    fn sample() -> Vec<Chapter> {
        vec![
            chapter(Subject::Mathematics, "Matrices", "Algebra", "Class 12", Status::Completed, Some(true)),
            chapter(Subject::Mathematics, "Limits", "Calculus", "Class 11", Status::NotStarted, None),
            chapter(Subject::Mathematics, "Vector Algebra", "Vector", "Class 12", Status::InProgress, Some(false)),
            chapter(Subject::Physics, "Optics", "Optics", "Class 12", Status::NotStarted, Some(true)),
            chapter(Subject::Chemistry, "Amines", "Organic Chemistry", "Class 12", Status::InProgress, None),
        ]
    }

    fn filters(pairs: &[(FilterField, &str)]) -> FilterState {
        let mut state = FilterState::unconstrained();
        for (field, value) in pairs {
            // Set fields directly so a subject in the list doesn't reset the others
            *state.get_mut(*field) = field.decode(value);
        }
        state
    }

    fn names(chapters: &[Chapter]) -> Vec<&str> {
        chapters.iter().map(|c| c.chapter.as_str()).collect()
    }

    #[test]
    fn test_all_sentinels_keep_everything() {
        let chapters = sample();
        assert_eq!(evaluate(&chapters, &FilterState::unconstrained()), chapters);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let chapters = sample();
        let cases = [
            filters(&[]),
            filters(&[(FilterField::Subject, "Mathematics")]),
            filters(&[(FilterField::Unit, "Algebra,Vector"), (FilterField::Weak, "false")]),
            filters(&[(FilterField::Class, "12"), (FilterField::Status, "In Progress")]),
            filters(&[(FilterField::Subject, "Biology")]),
        ];
        for state in &cases {
            let once = evaluate(&chapters, state);
            let twice = evaluate(&once, state);
            assert_eq!(once, twice, "not idempotent for {:?}", state);
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert!(evaluate(&[], &FilterState::default()).is_empty());
    }

    #[test]
    fn test_multi_select_units_union() {
        let chapters = sample();
        let state = filters(&[
            (FilterField::Subject, "Mathematics"),
            (FilterField::Unit, "Algebra,Vector"),
        ]);
        assert_eq!(names(&evaluate(&chapters, &state)), vec!["Matrices", "Vector Algebra"]);
    }

    #[test]
    fn test_class_prefix_stripped() {
        let chapters = vec![chapter(Subject::Physics, "Gravitation", "Mechanics 2", "Class 11", Status::NotStarted, None)];
        assert_eq!(evaluate(&chapters, &filters(&[(FilterField::Class, "11")])).len(), 1);
        assert!(evaluate(&chapters, &filters(&[(FilterField::Class, "12")])).is_empty());
        assert_eq!(evaluate(&chapters, &filters(&[(FilterField::Class, "12,11")])).len(), 1);
        // The full label is not a class number
        assert!(evaluate(&chapters, &filters(&[(FilterField::Class, "Class 11")])).is_empty());
    }

    #[test]
    fn test_weak_tri_state() {
        let chapters = sample();
        let weak = evaluate(&chapters, &filters(&[(FilterField::Weak, "true")]));
        assert_eq!(names(&weak), vec!["Matrices", "Optics"]);

        // Undefined and explicit false both count as not weak
        let not_weak = evaluate(&chapters, &filters(&[(FilterField::Weak, "false")]));
        assert_eq!(names(&not_weak), vec!["Limits", "Vector Algebra", "Amines"]);

        assert!(evaluate(&chapters, &filters(&[(FilterField::Weak, "maybe")])).is_empty());
    }

    #[test]
    fn test_status_and_subject_exact_match() {
        let chapters = sample();
        let state = filters(&[(FilterField::Status, "Not Started")]);
        assert_eq!(names(&evaluate(&chapters, &state)), vec!["Limits", "Optics"]);

        let state = filters(&[(FilterField::Subject, "Chemistry")]);
        assert_eq!(names(&evaluate(&chapters, &state)), vec!["Amines"]);
    }

    #[test]
    fn test_invalid_values_match_nothing() {
        let chapters = sample();
        assert!(evaluate(&chapters, &filters(&[(FilterField::Subject, "Biology")])).is_empty());
        assert!(evaluate(&chapters, &filters(&[(FilterField::Status, "Paused")])).is_empty());
        assert!(evaluate(&chapters, &filters(&[(FilterField::Unit, "Nowhere")])).is_empty());
    }

    #[test]
    fn test_single_value_fields_do_not_split() {
        assert_eq!(
            FilterField::Subject.decode("Physics,Chemistry"),
            Selection::only("Physics,Chemistry")
        );
        let chapters = sample();
        assert!(evaluate(&chapters, &filters(&[(FilterField::Subject, "Physics,Chemistry")])).is_empty());
    }

    #[test]
    fn test_sentinel_is_never_split() {
        assert_eq!(Selection::parse_multi("all"), Selection::All);
        assert_eq!(
            Selection::parse_multi("all,Optics"),
            Selection::Values(vec!["all".to_string(), "Optics".to_string()])
        );
    }

    #[test]
    fn test_encoding_preserves_boundary_string() {
        for raw in ["all", "Algebra", "Algebra,Vector", "Vector,Algebra", ""] {
            assert_eq!(Selection::parse_multi(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_toggled() {
        let selection = Selection::All.toggled("11", true);
        assert_eq!(selection.to_string(), "11");
        let selection = selection.toggled("12", true);
        assert_eq!(selection.to_string(), "11,12");
        let selection = selection.toggled("12", true);
        assert_eq!(selection.to_string(), "11,12");
        let selection = selection.toggled("11", false).toggled("12", false);
        assert_eq!(selection, Selection::All);
    }

    #[test]
    fn test_set_subject_resets_dependents() {
        let mut state = FilterState::default();
        state.set(FilterField::Unit, "Optics");
        state.set(FilterField::Class, "11,12");
        state.set(FilterField::Status, "Completed");
        state.set(FilterField::Weak, "true");

        state.set(FilterField::Subject, "Chemistry");

        assert_eq!(state.encoded(FilterField::Subject), "Chemistry");
        for field in [FilterField::Unit, FilterField::Class, FilterField::Status, FilterField::Weak] {
            assert_eq!(state.encoded(field), "all");
        }
        assert_eq!(state.selected_subject(), Some(Subject::Chemistry));
    }

    #[test]
    fn test_set_other_field_keeps_subject() {
        let mut state = FilterState::default();
        state.set(FilterField::Weak, "true");
        state.set(FilterField::Unit, "Optics");
        assert_eq!(state.encoded(FilterField::Subject), "Physics");
        assert_eq!(state.encoded(FilterField::Weak), "true");
    }

    #[test]
    fn test_filter_state_serializes_as_strings() {
        let mut state = FilterState::default();
        state.set(FilterField::Class, "11,12");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["subject"], "Physics");
        assert_eq!(json["class"], "11,12");
        assert_eq!(json["weak"], "all");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("class".parse::<FilterField>(), Ok(FilterField::Class));
        assert!("grade".parse::<FilterField>().is_err());
    }
}
