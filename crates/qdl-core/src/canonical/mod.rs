//! URL canonicalization.
//!
//! Search engines return the same catalog entity under many surface URLs:
//! one per storefront region (`/us-en/`, `/gb-en/`, `/de-de/` ...), with or
//! without the "download streaming albums" listing segment, or as a web
//! player link. `Canonicalizer` maps all of them onto one region-neutral
//! identity (`<kind>:<catalog id>`) and one canonical URL, and rejects
//! everything that is not a recognized catalog entity.

mod path;
mod region;
mod title;

pub use path::percent_decode;
pub use region::is_region_segment;
pub use title::display_title;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::CatalogConfig;

/// Catalog entity types the storefront exposes pages for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Label,
    Album,
    Artist,
    Track,
    Playlist,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Label,
        EntityKind::Album,
        EntityKind::Artist,
        EntityKind::Track,
        EntityKind::Playlist,
    ];

    /// Path word on the web player and in canonical ids.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Label => "label",
            EntityKind::Album => "album",
            EntityKind::Artist => "artist",
            EntityKind::Track => "track",
            EntityKind::Playlist => "playlist",
        }
    }

    /// Path word on the storefront; tracks have no store page.
    fn store_word(self) -> Option<&'static str> {
        match self {
            EntityKind::Label => Some("label"),
            EntityKind::Album => Some("album"),
            EntityKind::Artist => Some("interpreter"),
            EntityKind::Playlist => Some("playlists"),
            EntityKind::Track => None,
        }
    }

    fn from_store_word(word: &str) -> Option<Self> {
        match word {
            "label" => Some(EntityKind::Label),
            "album" => Some(EntityKind::Album),
            "interpreter" | "artist" => Some(EntityKind::Artist),
            "playlists" | "playlist" => Some(EntityKind::Playlist),
            _ => None,
        }
    }

    fn from_app_word(word: &str) -> Option<Self> {
        EntityKind::ALL.into_iter().find(|k| k.as_str() == word)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EntityKind::from_app_word(&lower)
            .or_else(|| EntityKind::from_store_word(&lower))
            .ok_or_else(|| format!("unknown entity kind: {s}"))
    }
}

/// Region-neutral identity of one catalog entity plus its canonical URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    /// `<kind>:<catalog id>`, e.g. `label:38597`.
    pub id: String,
    pub kind: EntityKind,
    pub catalog_id: String,
    /// Lowercased storefront slug, when the surface URL carried one.
    pub slug: Option<String>,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CanonicalizerError {
    #[error("reference locale {0:?} is not a region segment like \"se-en\"")]
    InvalidLocale(String),
    #[error("catalog domain {0:?} is not a host name")]
    InvalidDomain(String),
}

/// Maps surface URLs to canonical identities. Never fails at call time:
/// unrecognized input is rejected with `None`.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    domain: String,
    reference_locale: String,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        let cfg = CatalogConfig::default();
        Self {
            domain: cfg.domain,
            reference_locale: cfg.reference_locale,
        }
    }
}

impl Canonicalizer {
    pub fn new(domain: &str, reference_locale: &str) -> Result<Self, CanonicalizerError> {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty()
            || !domain.contains('.')
            || !domain
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
        {
            return Err(CanonicalizerError::InvalidDomain(domain));
        }
        if !is_region_segment(reference_locale) {
            return Err(CanonicalizerError::InvalidLocale(reference_locale.to_string()));
        }
        Ok(Self {
            domain,
            reference_locale: reference_locale.to_ascii_lowercase(),
        })
    }

    pub fn from_config(cfg: &CatalogConfig) -> Result<Self, CanonicalizerError> {
        Self::new(&cfg.domain, &cfg.reference_locale)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn reference_locale(&self) -> &str {
        &self.reference_locale
    }

    /// Web-player URL for an entity; the form used when no slug is known.
    pub fn app_url(&self, kind: EntityKind, catalog_id: &str) -> String {
        format!("https://play.{}/{}/{}", self.domain, kind.as_str(), catalog_id)
    }

    /// Canonical identity of `raw`, or `None` when it is not a catalog entity URL.
    pub fn canonicalize(&self, raw: &str) -> Option<CanonicalUrl> {
        let result = self.canonicalize_inner(raw);
        if result.is_none() {
            tracing::debug!(url = raw, "rejected: not a catalog entity URL");
        }
        result
    }

    fn canonicalize_inner(&self, raw: &str) -> Option<CanonicalUrl> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = match url::Url::parse(raw) {
            Ok(u) => u,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                url::Url::parse(&format!("https://{raw}")).ok()?
            }
            Err(_) => return None,
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }

        let host = parsed.host_str()?.trim_end_matches('.').to_ascii_lowercase();
        let subdomain = if host == self.domain {
            ""
        } else {
            host.strip_suffix(self.domain.as_str())?.strip_suffix('.')?
        };

        let segments: Vec<&str> = parsed
            .path_segments()?
            .filter(|s| !s.is_empty())
            .collect();

        let shape = match subdomain {
            "" | "www" => path::parse_store_path(&segments)?,
            "play" | "open" => path::parse_app_path(&segments)?,
            _ => return None,
        };

        let url = match (&shape.slug, shape.kind.store_word()) {
            (Some(slug), Some(word)) => format!(
                "https://www.{}/{}/{}/{}/{}",
                self.domain, self.reference_locale, word, slug, shape.catalog_id
            ),
            _ => self.app_url(shape.kind, &shape.catalog_id),
        };

        Some(CanonicalUrl {
            id: format!("{}:{}", shape.kind.as_str(), shape.catalog_id),
            kind: shape.kind,
            catalog_id: shape.catalog_id,
            slug: shape.slug,
            url,
        })
    }
}
