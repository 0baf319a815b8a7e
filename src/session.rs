//! The interactive explore loop: collect filters, preview, report, restart.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::console::Console;
use crate::dataset::{Dataset, DatasetRegistry};
use crate::filters::{FilterParams, collect_filters};
use crate::output::{OutputFormat, write_raw_rows, write_report};
use crate::stats::SelectionReport;
use crate::view::build_view;

/// Rows shown per raw-data preview page.
pub const PREVIEW_BATCH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Collecting,
    Reporting(FilterParams),
    Terminated,
}

pub struct Session<'a> {
    registry: &'a DatasetRegistry,
    format: OutputFormat,
}

impl<'a> Session<'a> {
    pub fn new(registry: &'a DatasetRegistry, format: OutputFormat) -> Self {
        Self { registry, format }
    }

    /// Builds the view for `params` and runs every applicable reporter.
    pub fn run_once(&self, params: FilterParams) -> SelectionReport {
        let view = build_view(self.registry, params);
        let has_demographics = self.registry.get(params.city).has_demographics();
        SelectionReport::build(&view, has_demographics)
    }

    /// Runs until the user answers anything but "yes" to the restart prompt.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let mut state = SessionState::Collecting;
        let mut rounds = 0usize;

        loop {
            state = match state {
                SessionState::Collecting => {
                    let params = collect_filters(console)?;
                    preview_raw_data(console, self.registry.get(params.city))?;
                    SessionState::Reporting(params)
                }
                SessionState::Reporting(params) => {
                    rounds += 1;
                    let report = self.run_once(params);
                    info!(round = rounds, %params, rows = report.rows, "Selection reported");
                    write_report(console.output(), &report, self.format)?;

                    // a closed input stream counts as "no"
                    let restart =
                        console.prompt_opt("\nWould you like to restart? Enter yes or no.\n")?;
                    if restart.as_deref() == Some("yes") {
                        SessionState::Collecting
                    } else {
                        SessionState::Terminated
                    }
                }
                SessionState::Terminated => break,
            };
            debug!(?state, "Session transition");
        }

        info!(rounds, "Session finished");
        Ok(())
    }
}

fn yes_no(token: &str) -> Option<bool> {
    match token.chars().next() {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    }
}

/// Offers to page through the city's raw rows five at a time.
pub fn preview_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &Dataset,
) -> Result<()> {
    let wanted = console.ask_with(
        "Would you like to see the raw data first (y or n): ",
        "answer (y or n)",
        yes_no,
    )?;
    if !wanted {
        return Ok(());
    }

    let mut pages = dataset.records().chunks(PREVIEW_BATCH).enumerate().peekable();
    while let Some((page, rows)) = pages.next() {
        write_raw_rows(console.output(), page * PREVIEW_BATCH, rows)?;
        if pages.peek().is_none() {
            break;
        }

        let more = console.prompt_opt("Would you like to see more raw data (y or n)? ")?;
        if !more.is_some_and(|answer| answer.starts_with('y')) {
            break;
        }
    }
    Ok(())
}
