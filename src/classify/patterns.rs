//! Pattern library for column name and value classification
//!
//! Pure data, no state: a fixed set of anchored shape regexes, each tagged
//! with the [`RiskLevel`] it implies, plus two disjoint keyword sets for
//! column-name hints. Unmatched input always yields the Low default; there
//! are no error conditions at classification time.

use crate::domain::errors::PrivsenseError;
use crate::domain::result::Result;
use crate::domain::risk::RiskLevel;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    /// Anchored regex patterns for this identifier shape
    patterns: Vec<String>,
    /// Risk level a match implies
    risk: RiskLevel,
}

/// Name hint keyword sets from TOML
#[derive(Debug, Clone, Default, Deserialize)]
struct NameHints {
    #[serde(default)]
    high: Vec<String>,
    #[serde(default)]
    medium: Vec<String>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: HashMap<String, PatternDefinition>,
    #[serde(default)]
    name_hints: NameHints,
}

/// A compiled value-shape pattern with its implied risk
#[derive(Debug, Clone)]
pub struct ShapePattern {
    /// Identifier shape name from the TOML (e.g. "email")
    pub name: String,
    /// Compiled anchored regex
    pub regex: Regex,
    /// Risk level a match implies
    pub risk: RiskLevel,
}

/// Registry of compiled shape patterns and name keyword sets
pub struct PatternRegistry {
    /// High-tier shape patterns, checked first
    high: Vec<ShapePattern>,
    /// Medium-tier shape patterns
    medium: Vec<ShapePattern>,
    /// Lowercased high-risk name hints
    high_hints: Vec<String>,
    /// Lowercased medium-risk name hints
    medium_hints: Vec<String>,
}

impl PatternRegistry {
    /// Create a registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PrivsenseError::Pattern(format!(
                "Failed to read pattern library {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Create a registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)
            .map_err(|e| PrivsenseError::Pattern(format!("Failed to parse pattern library: {e}")))?;

        let mut high = Vec::new();
        let mut medium = Vec::new();

        // Sort for a deterministic first-match-wins order within each tier
        let mut entries: Vec<_> = library.patterns.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, def) in entries {
            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    PrivsenseError::Pattern(format!(
                        "Invalid regex in pattern '{name}': {pattern_str}: {e}"
                    ))
                })?;
                let compiled = ShapePattern {
                    name: name.clone(),
                    regex,
                    risk: def.risk,
                };
                match def.risk {
                    RiskLevel::High => high.push(compiled),
                    RiskLevel::Medium => medium.push(compiled),
                    RiskLevel::Low => {
                        return Err(PrivsenseError::Pattern(format!(
                            "Pattern '{name}' declares risk Low; Low is the implicit fallback"
                        )))
                    }
                }
            }
        }

        let high_hints: Vec<String> = library
            .name_hints
            .high
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        let medium_hints: Vec<String> = library
            .name_hints
            .medium
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        // The tiers must be disjoint or name classification is ambiguous
        for hint in &medium_hints {
            if high_hints.contains(hint) {
                return Err(PrivsenseError::Pattern(format!(
                    "Name hint '{hint}' appears in both the high and medium tiers"
                )));
            }
        }

        Ok(Self {
            high,
            medium,
            high_hints,
            medium_hints,
        })
    }

    /// Create a registry with the built-in pattern library
    pub fn builtin() -> Result<Self> {
        let default_toml = include_str!("../../patterns/risk_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All compiled shape patterns, High tier first
    pub fn shape_patterns(&self) -> impl Iterator<Item = &ShapePattern> {
        self.high.iter().chain(self.medium.iter())
    }

    /// Classify a single cell value by shape.
    ///
    /// Tiers are checked High before Medium, first match wins within a
    /// tier; empty or unmatched values yield the Low default.
    pub fn classify_value(&self, value: &str) -> RiskLevel {
        let value = value.trim();
        if value.is_empty() {
            return RiskLevel::Low;
        }
        if self.high.iter().any(|p| p.regex.is_match(value)) {
            return RiskLevel::High;
        }
        if self.medium.iter().any(|p| p.regex.is_match(value)) {
            return RiskLevel::Medium;
        }
        RiskLevel::Low
    }

    /// Classify a column name by case-insensitive substring hints.
    ///
    /// The High tier is checked before Medium; no hint means Low.
    pub fn classify_name(&self, name: &str) -> RiskLevel {
        let name = name.to_lowercase();
        if self.high_hints.iter().any(|h| name.contains(h.as_str())) {
            return RiskLevel::High;
        }
        if self.medium_hints.iter().any(|h| name.contains(h.as_str())) {
            return RiskLevel::Medium;
        }
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn registry() -> PatternRegistry {
        PatternRegistry::builtin().unwrap()
    }

    #[test]
    fn test_builtin_library_loads() {
        let registry = registry();
        assert!(registry.shape_patterns().count() >= 8);
    }

    #[test_case("john.doe@example.com", RiskLevel::High; "email")]
    #[test_case("123-456-789", RiskLevel::High; "national id shape")]
    #[test_case("4532 1234 5678 9012", RiskLevel::High; "card shape")]
    #[test_case("+1-555-123-4567", RiskLevel::Medium; "phone")]
    #[test_case("1990-01-01", RiskLevel::Medium; "iso date")]
    #[test_case("01/01/1990", RiskLevel::Medium; "slash date")]
    #[test_case("M5H 2N2", RiskLevel::Medium; "postal code")]
    #[test_case("m5h 2n2", RiskLevel::Medium; "postal code lowercase")]
    #[test_case("192.168.1.1", RiskLevel::Medium; "ipv4")]
    #[test_case("40.7128,-74.0060", RiskLevel::Medium; "lat long")]
    #[test_case("Electronics", RiskLevel::Low; "plain word")]
    #[test_case("CUST001", RiskLevel::Low; "customer code")]
    #[test_case("", RiskLevel::Low; "empty")]
    #[test_case("   ", RiskLevel::Low; "whitespace only")]
    fn test_classify_value(value: &str, expected: RiskLevel) {
        assert_eq!(registry().classify_value(value), expected);
    }

    #[test_case("ssn", RiskLevel::High)]
    #[test_case("customer_SSN", RiskLevel::High; "substring case insensitive")]
    #[test_case("credit_card_number", RiskLevel::High)]
    #[test_case("email_address", RiskLevel::Medium)]
    #[test_case("date_of_birth", RiskLevel::Medium)]
    #[test_case("quantity", RiskLevel::Low)]
    #[test_case("id", RiskLevel::Low)]
    fn test_classify_name(name: &str, expected: RiskLevel) {
        assert_eq!(registry().classify_name(name), expected);
    }

    #[test]
    fn test_overlapping_hint_tiers_rejected() {
        let toml = r#"
            [patterns.email]
            patterns = ['^a$']
            risk = "High"

            [name_hints]
            high = ["ssn"]
            medium = ["ssn"]
        "#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_low_shape_pattern_rejected() {
        let toml = r#"
            [patterns.noise]
            patterns = ['^x$']
            risk = "Low"
        "#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let toml = r#"
            [patterns.broken]
            patterns = ['^(unclosed$']
            risk = "High"
        "#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }
}
