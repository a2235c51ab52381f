//! Implementation of `corpus inspect`.

use std::{fs, path::Path, process::ExitCode};

use serde::Serialize;

use corpus_document::{Section, parse_sections};

/// One row of inspect output.
#[derive(Debug, Serialize)]
struct SectionReport<'a> {
    /// Derived display title.
    title: &'a str,
    /// Derived anchor slug.
    slug: &'a str,
    /// Number of lines in the section body.
    lines: usize,
}

impl<'a> SectionReport<'a> {
    /// Summarizes one parsed section.
    fn from_section(section: &'a Section) -> Self {
        Self {
            title: &section.title,
            slug: &section.slug,
            lines: section.body.lines().count(),
        }
    }
}

/// Shows how one document splits into sections.
pub fn run(file: &Path, json: bool) -> ExitCode {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", file.display());
            return ExitCode::FAILURE;
        }
    };

    let sections = parse_sections(&content);
    let reports: Vec<SectionReport<'_>> = sections.iter().map(SectionReport::from_section).collect();

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{} sections", reports.len());
        for (index, report) in reports.iter().enumerate() {
            println!(
                "{index:>3}  #{slug}  {title}  ({lines} lines)",
                slug = report.slug,
                title = report.title,
                lines = report.lines
            );
        }
    }

    ExitCode::SUCCESS
}
