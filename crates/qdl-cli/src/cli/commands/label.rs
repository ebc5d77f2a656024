//! `qdl label [QUERY]...` – discover a label's pages, select, print a plan.

use anyhow::{bail, Context, Result};
use qdl_core::aggregate::{discover_labels, normalize_name, AggregateOptions};
use qdl_core::canonical::Canonicalizer;
use qdl_core::config::QdlConfig;
use qdl_core::control::CancelToken;
use qdl_core::naming::{FormatConfig, NamingResolver};
use qdl_core::plan::PlanOutcome;
use qdl_core::quality::Quality;
use qdl_core::search::JsonSearchEngine;
use qdl_core::select::SelectableItem;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

use super::{cap_items, select_on_terminal, write_plan};

#[derive(Debug, Default)]
pub struct LabelArgs {
    pub query: Vec<String>,
    pub limit: Option<usize>,
    pub workers: Option<usize>,
    pub quality: Option<Quality>,
    pub plan_out: Option<PathBuf>,
}

pub async fn run_label(cfg: &QdlConfig, format: FormatConfig, args: LabelArgs) -> Result<()> {
    let mut name = match normalize_name(&args.query.join(" ")) {
        Some(name) => name,
        None => match read_query().await? {
            Some(name) => name,
            None => bail!("no label name given"),
        },
    };

    let canonicalizer = Canonicalizer::from_config(&cfg.catalog)?;
    let engine = Arc::new(JsonSearchEngine::from_config(&cfg.search)?);
    let mut options = AggregateOptions::from_config(cfg);
    if let Some(workers) = args.workers {
        options.max_workers = workers.max(1);
    }

    // Ctrl-C during the search aborts the remaining queries; the selector
    // later reads Ctrl-C as a key in raw mode.
    let cancel = CancelToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; aborting remaining queries");
                cancel.cancel();
            }
        })
    };

    let report = loop {
        eprintln!("Searching for label \"{name}\"...");
        let report = discover_labels(Arc::clone(&engine), &canonicalizer, &name, &options, &cancel).await;
        for skipped in &report.skipped {
            eprintln!("  skipped query \"{}\": {}", skipped.query, skipped.reason);
        }
        if report.aborted || !report.results.is_empty() {
            break report;
        }
        eprintln!("No label pages found for \"{name}\".");
        match read_query().await? {
            Some(next) => name = next,
            None => {
                watcher.abort();
                return Ok(());
            }
        }
    };
    watcher.abort();

    if report.aborted {
        if report.results.is_empty() {
            eprintln!("Search interrupted; nothing found yet.");
            return Ok(());
        }
        eprintln!("Search interrupted; showing partial results.");
    }

    let limit = args.limit.unwrap_or(cfg.interactive_limit);
    let labels = cap_items(report.results, limit);
    let items: Vec<SelectableItem> = labels.into_iter().map(SelectableItem::Label).collect();

    let quality = args.quality.unwrap_or(cfg.default_quality);
    let selection = select_on_terminal(format!("Labels for \"{name}\""), quality, items).await?;

    let resolver = NamingResolver::new(format);
    let outcome =
        PlanOutcome::from_selection(selection, &resolver, &canonicalizer, &cfg.download_dir, quality);
    write_plan(&outcome, args.plan_out.as_deref())
}

/// Asks for a label name on stderr. `None` on Ctrl-C, end of input or a
/// blank answer. The read runs on a detached thread so a pending read
/// never holds up exit.
async fn read_query() -> Result<Option<String>> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let _ = tx.send(prompt_for_query());
    });
    tokio::select! {
        read = rx => read.context("prompt thread exited")?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            Ok(None)
        }
    }
}

fn prompt_for_query() -> Result<Option<String>> {
    eprint!("Enter a label name [Ctrl + c to quit]: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(normalize_name(&line))
}
