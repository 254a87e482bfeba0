//! Unit option tables

use anyhow::Result;
use serde::Serialize;

use crate::chapter::Subject;
use crate::cli::output::{OutputFormat, print_formatted};
use crate::view;

#[derive(Serialize)]
struct SubjectUnits {
    subject: Subject,
    units: &'static [String],
}

pub async fn run(subject: Option<String>, format: OutputFormat, _quiet: bool) -> Result<()> {
    let subjects = match subject {
        Some(name) => vec![name.parse::<Subject>().map_err(anyhow::Error::msg)?],
        None => Subject::all().to_vec(),
    };

    let tables: Vec<SubjectUnits> = subjects
        .into_iter()
        .map(|subject| SubjectUnits {
            subject,
            units: view::unit_options(subject),
        })
        .collect();

    print_formatted(&tables, format, |tables| {
        tables
            .iter()
            .map(|t| {
                let lines: Vec<String> = t.units.iter().map(|u| format!("  {}", u)).collect();
                format!("{}:\n{}", t.subject, lines.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    });

    Ok(())
}
