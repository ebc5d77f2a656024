//! `qdl canon <SOURCE>...` – print canonical identities.

use anyhow::Result;
use qdl_core::canonical::Canonicalizer;
use qdl_core::config::QdlConfig;
use qdl_core::sources::read_sources;

pub fn run_canon(cfg: &QdlConfig, sources: &[String]) -> Result<()> {
    let canonicalizer = Canonicalizer::from_config(&cfg.catalog)?;
    let urls = read_sources(sources)?;
    let mut rejected = 0usize;
    println!("{:<24} {}", "ID", "CANONICAL URL");
    for raw in &urls {
        match canonicalizer.canonicalize(raw) {
            Some(c) => println!("{:<24} {}", c.id, c.url),
            None => {
                rejected += 1;
                println!("{:<24} {}", "-", raw);
            }
        }
    }
    if rejected > 0 {
        eprintln!("{rejected} of {} URL(s) are not catalog entity URLs.", urls.len());
    }
    Ok(())
}
