//! Stream quality tiers offered by the catalog service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality ids are the catalog service's format ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    Mp3,
    #[default]
    Cd,
    HiRes96,
    HiRes192,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Mp3, Quality::Cd, Quality::HiRes96, Quality::HiRes192];

    pub fn id(self) -> u8 {
        match self {
            Quality::Mp3 => 5,
            Quality::Cd => 6,
            Quality::HiRes96 => 7,
            Quality::HiRes192 => 27,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Mp3 => "5 - MP3",
            Quality::Cd => "6 - 16 bit, 44.1kHz",
            Quality::HiRes96 => "7 - 24 bit, <96kHz",
            Quality::HiRes192 => "27 - 24 bit, >96kHz",
        }
    }

    pub fn from_id(id: u8) -> Option<Quality> {
        Self::ALL.into_iter().find(|q| q.id() == id)
    }

    /// Next tier, wrapping to the lowest.
    pub fn next(self) -> Quality {
        let pos = self.position();
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous tier, wrapping to the highest.
    pub fn prev(self) -> Quality {
        let pos = self.position();
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&q| q == self).unwrap_or(0)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Quality {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Quality::from_id(id).ok_or_else(|| format!("unknown quality id {id} (expected 5, 6, 7 or 27)"))
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.id()
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid quality '{s}' (expected 5, 6, 7 or 27)"))?;
        Quality::try_from(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_labels() {
        assert_eq!(Quality::from_id(27), Some(Quality::HiRes192));
        assert_eq!(Quality::from_id(8), None);
        assert_eq!(Quality::Cd.to_string(), "6 - 16 bit, 44.1kHz");
        assert_eq!("7".parse::<Quality>(), Ok(Quality::HiRes96));
        assert!("lossless".parse::<Quality>().is_err());
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(Quality::HiRes192.next(), Quality::Mp3);
        assert_eq!(Quality::Mp3.prev(), Quality::HiRes192);
        assert_eq!(Quality::Cd.next().prev(), Quality::Cd);
    }

    #[test]
    fn serializes_as_id() {
        assert_eq!(serde_json::to_string(&Quality::HiRes96).unwrap(), "7");
        let q: Quality = serde_json::from_str("5").unwrap();
        assert_eq!(q, Quality::Mp3);
        assert!(serde_json::from_str::<Quality>("9").is_err());
    }
}
