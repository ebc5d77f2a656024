//! CLI command handlers, one file per command.

mod canon;
mod completions;
mod label;
mod name;
mod pick;
mod show_config;

pub use canon::run_canon;
pub use completions::{run_completions, run_man};
pub use label::{run_label, LabelArgs};
pub use name::run_name;
pub use pick::run_pick;
#[cfg(test)]
pub(crate) use pick::read_listing;
pub use show_config::run_show_config;

use anyhow::{Context, Result};
use qdl_core::plan::PlanOutcome;
use qdl_core::quality::Quality;
use qdl_core::select::{CrosstermTerminal, Selectable, Selection, Selector};
use std::path::Path;

/// Runs the selector on the real terminal. Key reads block, so the session
/// lives on a blocking thread.
async fn select_on_terminal<T>(title: String, quality: Quality, items: Vec<T>) -> Result<Selection<T>>
where
    T: Selectable + Send + 'static,
{
    let selection = tokio::task::spawn_blocking(move || {
        let mut terminal = CrosstermTerminal::new();
        Selector::new(title).with_quality(quality).run(&mut terminal, items)
    })
    .await
    .context("selector thread failed")?
    .context("terminal error")?;
    Ok(selection)
}

/// Keeps the first `limit` items (at least one) for the selector.
pub(crate) fn cap_items<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    let limit = limit.max(1);
    if items.len() > limit {
        tracing::info!(found = items.len(), limit, "truncating result list");
        items.truncate(limit);
    }
    items
}

/// Prints the plan to stdout, or writes it to `out`.
fn write_plan(outcome: &PlanOutcome, out: Option<&Path>) -> Result<()> {
    let json = outcome.to_json_pretty()?;
    match outcome {
        PlanOutcome::Queued(plan) => {
            eprintln!("Queued {} item(s) at quality {}.", plan.entries.len(), plan.quality)
        }
        PlanOutcome::Cancelled => eprintln!("Selection cancelled; nothing queued."),
    }
    match out {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            eprintln!("Plan written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
