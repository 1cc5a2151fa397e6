//! Free-text sector label → concrete `Sector`.
//!
//! Case-insensitive substring rules, evaluated top to bottom; first match
//! wins. Labels matching nothing land in `Big Tech`. The result is never
//! `Sector::All`.

use crate::sector::Sector;

/// Ordered keyword rules. Order is the tie-break: "AI chip" is `AI`,
/// "semiconductor data center" is `Data Center`.
const RULES: &[(&[&str], Sector)] = &[
    (&["ai"], Sector::Ai),
    (&["tech"], Sector::BigTech),
    (&["robot"], Sector::Robotics),
    (&["nuclear"], Sector::NuclearFusion),
    (&["data"], Sector::DataCenter),
    (&["chip", "semi"], Sector::Chips),
    (&["space"], Sector::Space),
    (&["energy"], Sector::Energy),
];

pub const DEFAULT_SECTOR: Sector = Sector::BigTech;

pub fn map_sector(raw: &str) -> Sector {
    let normalized = raw.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(_, sector)| *sector)
        .unwrap_or(DEFAULT_SECTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::CONCRETE_SECTORS;

    #[test]
    fn wire_names_map_to_themselves() {
        for s in CONCRETE_SECTORS {
            assert_eq!(map_sector(s.as_str()), s, "{s}");
        }
    }

    #[test]
    fn rule_order_breaks_ties() {
        assert_eq!(map_sector("AI Chips"), Sector::Ai);
        assert_eq!(map_sector("Semiconductor data hubs"), Sector::DataCenter);
        assert_eq!(map_sector("Space energy"), Sector::Space);
        assert_eq!(map_sector("Nuclear energy"), Sector::NuclearFusion);
    }

    #[test]
    fn unknown_and_empty_default_to_big_tech() {
        assert_eq!(map_sector(""), Sector::BigTech);
        assert_eq!(map_sector("Biotech"), Sector::BigTech); // "tech"
        assert_eq!(map_sector("Pharma"), Sector::BigTech);
        assert_eq!(map_sector("ALL"), Sector::BigTech);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "retail" contains "ai"
        assert_eq!(map_sector("Retail"), Sector::Ai);
        assert_eq!(map_sector("SEMICONDUCTORS"), Sector::Chips);
    }
}
