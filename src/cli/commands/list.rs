//! Chapter listing command

use anyhow::Result;
use clap::Args;

use crate::catalog;
use crate::chapter::Chapter;
use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::filter::FilterField;
use crate::store::ChaptersStore;
use crate::view::{self, CardSummary, SortOrder};

/// Filter and sort options for `list`
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Subject (e.g., "Physics", or "all")
    #[arg(long)]
    pub subject: Option<String>,

    /// Units, comma-separated (e.g., "Optics,Mechanics 1")
    #[arg(long)]
    pub unit: Option<String>,

    /// Status (e.g., "Not Started")
    #[arg(long)]
    pub status: Option<String>,

    /// Class numbers, comma-separated (e.g., "11,12")
    #[arg(long)]
    pub class: Option<String>,

    /// Weak chapters only ("true"), strong only ("false") or "all"
    #[arg(long)]
    pub weak: Option<String>,

    /// Sort by total questions
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl ListArgs {
    /// Apply the given filters to the store. Subject goes first since
    /// setting it clears the others.
    pub fn apply(&self, store: &mut ChaptersStore) {
        let fields = [
            (FilterField::Subject, &self.subject),
            (FilterField::Unit, &self.unit),
            (FilterField::Status, &self.status),
            (FilterField::Class, &self.class),
            (FilterField::Weak, &self.weak),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                store.set_filter(field, value);
            }
        }
    }
}

pub async fn run(args: ListArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = Config::load_or_default();
    let mut store = ChaptersStore::new(catalog::source_from_config(&config));

    store.load();
    store.settle().await;
    if let Some(error) = store.error() {
        anyhow::bail!("{}", error);
    }

    args.apply(&mut store);
    let order = args.sort.unwrap_or(config.display.default_sort);
    print_chapters(&view::sorted(store.filtered_chapters(), order), format, quiet);

    Ok(())
}

/// Print chapters as text cards or a JSON array
pub fn print_chapters(chapters: &[&Chapter], format: OutputFormat, quiet: bool) {
    let cards: Vec<CardSummary> = chapters.iter().map(|c| CardSummary::from_chapter(c)).collect();

    print_formatted(&cards, format, |cards| {
        cards.iter().map(format_card).collect::<Vec<_>>().join("\n")
    });

    if format == OutputFormat::Text {
        print_success(&view::count_label(cards.len()), quiet);
    }
}

/// One line per chapter, mirroring the desktop card
pub fn format_card(card: &CardSummary) -> String {
    let arrow = card.trend_arrow().map(|a| format!(" {}", a)).unwrap_or_default();
    let weak = if card.weak { " [weak]" } else { "" };
    format!(
        "{:<40} {:<9} {}{} | {} | {}{}",
        card.title,
        card.class,
        card.latest_label(),
        arrow,
        card.previous_label(),
        card.solved_label(),
        weak,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::ScriptedSource;
    use crate::chapter::fixtures::{chapter, with_years};
    use crate::chapter::{Status, Subject};
    use std::sync::Arc;

    fn catalog() -> Vec<Chapter> {
        vec![
            chapter(Subject::Physics, "Optics", "Optics", "Class 12", Status::NotStarted, Some(true)),
            chapter(Subject::Physics, "Kinematics", "Mechanics 1", "Class 11", Status::Completed, None),
            chapter(Subject::Chemistry, "Amines", "Organic Chemistry", "Class 12", Status::NotStarted, None),
        ]
    }

    #[tokio::test]
    async fn test_apply_filters_in_order() {
        let mut store = ChaptersStore::new(Arc::new(ScriptedSource::ok(catalog())));
        store.load();
        store.settle().await;

        // Subject comes after status on the command line but is applied first
        let args = ListArgs {
            status: Some("Not Started".to_string()),
            subject: Some("all".to_string()),
            ..Default::default()
        };
        args.apply(&mut store);

        let names: Vec<&str> = store.filtered_chapters().iter().map(|c| c.chapter.as_str()).collect();
        assert_eq!(names, vec!["Optics", "Amines"]);
    }

    #[tokio::test]
    async fn test_no_args_keeps_default_subject() {
        let mut store = ChaptersStore::new(Arc::new(ScriptedSource::ok(catalog())));
        store.load();
        store.settle().await;

        ListArgs::default().apply(&mut store);
        assert_eq!(store.filtered_chapters().len(), 2);
    }

    #[test]
    fn test_format_card() {
        let optics = with_years(
            chapter(Subject::Physics, "Optics", "Optics", "Class 12", Status::InProgress, Some(true)),
            &[("2025", 8), ("2024", 5)],
        );
        let line = format_card(&CardSummary::from_chapter(&optics));
        assert!(line.starts_with("Optics"));
        assert!(line.contains("2025: 8 Qs ↑ | 2024: 5 Qs"));
        assert!(line.ends_with("[weak]"));
    }
}
