use serde::{Deserialize, Serialize};

/// Sentinel pillar tag enabling every rule set.
pub const ALL_PILLARS: &str = "all";

/// A Well-Architected evaluation category.
///
/// Serialized capitalized ("Security") as findings carry it on the wire;
/// lowercase aliases are accepted when parsing engine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(alias = "security")]
    Security,
    #[serde(alias = "reliability")]
    Reliability,
    #[serde(alias = "performance")]
    Performance,
    #[serde(alias = "cost")]
    Cost,
}

impl Pillar {
    /// Fixed evaluation order.
    pub const ALL: [Pillar; 4] = [
        Pillar::Security,
        Pillar::Reliability,
        Pillar::Performance,
        Pillar::Cost,
    ];

    /// The lowercase tag used in review requests and queue messages.
    pub fn key(&self) -> &'static str {
        match self {
            Pillar::Security => "security",
            Pillar::Reliability => "reliability",
            Pillar::Performance => "performance",
            Pillar::Cost => "cost",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Security => "Security",
            Pillar::Reliability => "Reliability",
            Pillar::Performance => "Performance",
            Pillar::Cost => "Cost",
        }
    }
}

/// Whether a requested pillar list enables the given pillar, honoring the
/// `all` sentinel. Unknown tags simply never match.
pub fn pillar_enabled(requested: &[String], pillar: Pillar) -> bool {
    requested.iter().any(|tag| {
        tag.eq_ignore_ascii_case(ALL_PILLARS) || tag.eq_ignore_ascii_case(pillar.key())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_enables_every_pillar() {
        let requested = vec!["all".to_string()];
        for pillar in Pillar::ALL {
            assert!(pillar_enabled(&requested, pillar));
        }
    }

    #[test]
    fn test_explicit_selection() {
        let requested = vec!["security".to_string(), "cost".to_string()];
        assert!(pillar_enabled(&requested, Pillar::Security));
        assert!(pillar_enabled(&requested, Pillar::Cost));
        assert!(!pillar_enabled(&requested, Pillar::Reliability));
        assert!(!pillar_enabled(&requested, Pillar::Performance));
    }

    #[test]
    fn test_unknown_tags_never_match() {
        let requested = vec!["operational-excellence".to_string()];
        for pillar in Pillar::ALL {
            assert!(!pillar_enabled(&requested, pillar));
        }
    }

    #[test]
    fn test_pillar_serialization() {
        assert_eq!(serde_json::to_string(&Pillar::Security).unwrap(), "\"Security\"");
        let parsed: Pillar = serde_json::from_str("\"security\"").unwrap();
        assert_eq!(parsed, Pillar::Security);
    }
}
