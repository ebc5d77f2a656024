//! `qdl pick <FILE>` – select from a JSON listing, print a plan.

use anyhow::{Context, Result};
use qdl_core::canonical::Canonicalizer;
use qdl_core::config::QdlConfig;
use qdl_core::naming::{FormatConfig, NamingResolver};
use qdl_core::plan::PlanOutcome;
use qdl_core::quality::Quality;
use qdl_core::select::SelectableItem;
use std::path::Path;

use super::{cap_items, select_on_terminal, write_plan};

pub async fn run_pick(
    cfg: &QdlConfig,
    format: FormatConfig,
    file: &Path,
    limit: Option<usize>,
    quality: Option<Quality>,
    plan_out: Option<&Path>,
) -> Result<()> {
    let items = read_listing(file)?;
    if items.is_empty() {
        eprintln!("{} lists no items.", file.display());
        return Ok(());
    }
    let listed = items.len();
    let items = cap_items(items, limit.unwrap_or(cfg.interactive_limit));
    let canonicalizer = Canonicalizer::from_config(&cfg.catalog)?;
    let quality = quality.unwrap_or(cfg.default_quality);
    let title = format!("{} ({} of {listed} items)", file.display(), items.len());
    let selection = select_on_terminal(title, quality, items).await?;

    let resolver = NamingResolver::new(format);
    let outcome =
        PlanOutcome::from_selection(selection, &resolver, &canonicalizer, &cfg.download_dir, quality);
    write_plan(&outcome, plan_out)
}

pub(crate) fn read_listing(file: &Path) -> Result<Vec<SelectableItem>> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let items: Vec<SelectableItem> = serde_json::from_str(&data)
        .with_context(|| format!("invalid item listing {}", file.display()))?;
    tracing::debug!(file = %file.display(), items = items.len(), "loaded listing");
    Ok(items)
}
