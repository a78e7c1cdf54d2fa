//! The two permitted ledger entry types.

use serde::{Deserialize, Serialize};

/// Ledger entry type: money in ("masuk") or money out ("keluar").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Inflow.
    Masuk,
    /// Outflow.
    Keluar,
}

impl EntryType {
    /// Parses a write-path value. Anything but the two literal values is an
    /// error: Create and Update reject unknown types outright.
    ///
    /// # Errors
    ///
    /// Returns the rejected input string.
    pub fn parse_strict(s: &str) -> Result<Self, String> {
        match s {
            "masuk" => Ok(Self::Masuk),
            "keluar" => Ok(Self::Keluar),
            other => Err(other.to_string()),
        }
    }

    /// Parses a list-filter value. Unknown values yield `None`, which means
    /// "no type predicate": the filter is ignored, not rejected. This
    /// asymmetry with the write path is deliberate.
    #[must_use]
    pub fn parse_filter(s: &str) -> Option<Self> {
        Self::parse_strict(s).ok()
    }

    /// Returns the wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Masuk => "masuk",
            Self::Keluar => "keluar",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_accepts_only_the_two_values() {
        assert_eq!(EntryType::parse_strict("masuk"), Ok(EntryType::Masuk));
        assert_eq!(EntryType::parse_strict("keluar"), Ok(EntryType::Keluar));
        assert_eq!(EntryType::parse_strict("bogus"), Err("bogus".to_string()));
        // No case folding: the storage constraint is on the exact literals.
        assert!(EntryType::parse_strict("MASUK").is_err());
        assert!(EntryType::parse_strict("").is_err());
    }

    #[test]
    fn test_parse_filter_ignores_unknown_values() {
        assert_eq!(EntryType::parse_filter("masuk"), Some(EntryType::Masuk));
        assert_eq!(EntryType::parse_filter("keluar"), Some(EntryType::Keluar));
        assert_eq!(EntryType::parse_filter("bogus"), None);
        assert_eq!(EntryType::parse_filter(""), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&EntryType::Masuk).unwrap();
        assert_eq!(json, "\"masuk\"");
        let back: EntryType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntryType::Masuk);
    }
}
