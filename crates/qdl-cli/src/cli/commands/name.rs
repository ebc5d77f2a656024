//! `qdl name --mode M --tag k=v...` – preview resolved names.

use anyhow::Result;
use qdl_core::config::QdlConfig;
use qdl_core::naming::{FormatConfig, NamingResolver, SearchMode, Tags};

pub fn run_name(
    cfg: &QdlConfig,
    format: FormatConfig,
    mode: SearchMode,
    tags: Vec<(String, String)>,
) -> Result<()> {
    let resolver = NamingResolver::new(format);
    let tags: Tags = tags.into_iter().collect();
    let (key, _) = resolver.config().template_for(mode);
    let name = resolver.resolve(mode, &tags);

    println!("mode:       {mode}");
    println!("template:   {}", key.unwrap_or("(built-in)"));
    println!(
        "top folder: {}",
        name.top_folder.as_deref().unwrap_or("(none)")
    );
    println!("folder:     {}", name.sub_folder);
    println!("track:      {}", name.track_pattern);
    println!("path:       {}", name.folder_path(&cfg.download_dir).display());
    Ok(())
}
