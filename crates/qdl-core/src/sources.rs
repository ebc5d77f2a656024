//! Command-line sources: URLs given directly or listed in text files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Expands `args` into URLs. An argument naming an existing file is read as
/// a URL list (one per line; blank lines and `#` comments skipped); anything
/// else is taken as a URL as-is.
pub fn read_sources<S: AsRef<str>>(args: &[S]) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for arg in args {
        let arg = arg.as_ref().trim();
        if arg.is_empty() {
            continue;
        }
        let path = Path::new(arg);
        if !arg.contains("://") && path.is_file() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read URL list {}", path.display()))?;
            let before = urls.len();
            urls.extend(url_lines(&text));
            tracing::debug!(file = %path.display(), urls = urls.len() - before, "read URL list");
        } else {
            urls.push(arg.to_string());
        }
    }
    Ok(urls)
}

fn url_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}
