//! # Sector Catalog
//! Closed set of investment sectors the feed can be filtered by.
//!
//! `Sector::All` is a query-level meta value ("no filter"); it never appears
//! on an individual news item. Wire names match what the model is asked to
//! return (`"Big Tech"`, `"Nuclear Fusion"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Big Tech")]
    BigTech,
    Robotics,
    Energy,
    #[serde(rename = "Nuclear Fusion")]
    NuclearFusion,
    #[serde(rename = "Data Center")]
    DataCenter,
    Chips,
    Space,
}

/// One catalog row: wire key plus the Korean display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectorEntry {
    pub key: Sector,
    pub label: &'static str,
}

/// Catalog in display order (`ALL` first).
pub static SECTORS: [SectorEntry; 9] = [
    SectorEntry { key: Sector::All, label: "전체" },
    SectorEntry { key: Sector::Ai, label: "AI" },
    SectorEntry { key: Sector::BigTech, label: "빅테크" },
    SectorEntry { key: Sector::Robotics, label: "로봇" },
    SectorEntry { key: Sector::Energy, label: "에너지" },
    SectorEntry { key: Sector::NuclearFusion, label: "핵융합" },
    SectorEntry { key: Sector::DataCenter, label: "데이터센터" },
    SectorEntry { key: Sector::Chips, label: "칩" },
    SectorEntry { key: Sector::Space, label: "우주" },
];

/// The eight sectors a news item may carry.
pub const CONCRETE_SECTORS: [Sector; 8] = [
    Sector::Ai,
    Sector::BigTech,
    Sector::Robotics,
    Sector::Energy,
    Sector::NuclearFusion,
    Sector::DataCenter,
    Sector::Chips,
    Sector::Space,
];

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::All => "ALL",
            Sector::Ai => "AI",
            Sector::BigTech => "Big Tech",
            Sector::Robotics => "Robotics",
            Sector::Energy => "Energy",
            Sector::NuclearFusion => "Nuclear Fusion",
            Sector::DataCenter => "Data Center",
            Sector::Chips => "Chips",
            Sector::Space => "Space",
        }
    }

    /// Korean display label from the catalog.
    pub fn label(&self) -> &'static str {
        SECTORS
            .iter()
            .find(|e| e.key == *self)
            .map(|e| e.label)
            .unwrap_or("")
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Sector::All)
    }

    /// Feed heading shown above the cards.
    pub fn heading(&self) -> String {
        if self.is_all() {
            "Trending Now".to_string()
        } else {
            format!("{} News", self.as_str())
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sector: {0}")]
pub struct UnknownSector(pub String);

impl FromStr for Sector {
    type Err = UnknownSector;

    /// Exact wire names only (case-insensitive). Free-text classification of
    /// model output goes through `sector_mapper::map_sector` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        SECTORS
            .iter()
            .map(|e| e.key)
            .find(|k| k.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| UnknownSector(t.to_string()))
    }
}
