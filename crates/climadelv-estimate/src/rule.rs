//! Estimation rule types and configuration schema.
//!
//! A `RuleTable` is deserialized from TOML and holds an ordered list of
//! `EstimationRule`s plus a `Fallback`. Rules are evaluated in declaration
//! order and the first keyword hit wins. If no rule matches, the fallback
//! draws a random whole number of kilograms from its range.

use serde::{Deserialize, Serialize};

/// How a matching rule turns the numeric inputs into kilograms of CO2.
///
/// Example in TOML:
/// ```toml
/// formula = { kind = "per-tree", factor = 22.0 }
/// formula = { kind = "per-participant", factor = 2.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Formula {
    /// `trees * factor`; participant count is ignored.
    PerTree { factor: f64 },
    /// `participants * factor`; tree count is ignored.
    PerParticipant { factor: f64 },
}

impl Formula {
    pub fn apply(&self, participants: u32, trees: u32) -> f64 {
        match *self {
            Formula::PerTree { factor } => f64::from(trees) * factor,
            Formula::PerParticipant { factor } => f64::from(participants) * factor,
        }
    }

    pub fn factor(&self) -> f64 {
        match *self {
            Formula::PerTree { factor } | Formula::PerParticipant { factor } => factor,
        }
    }
}

/// A single keyword rule loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRule {
    /// Stable identifier, reported alongside each estimate.
    pub id: String,

    /// Human-readable note on where the factor comes from.
    #[serde(default)]
    pub description: String,

    /// Substring searched for in the activity text, case-insensitively.
    pub keyword: String,

    pub formula: Formula,

    /// Advisory tip shown to the user when this rule matches.
    pub tip: String,
}

impl EstimationRule {
    /// Return true if `activity` contains this rule's keyword, ignoring case.
    ///
    /// `lowered_activity` must already be lowercase.
    pub fn matches(&self, lowered_activity: &str) -> bool {
        lowered_activity.contains(&self.keyword.to_lowercase())
    }
}

/// What to award when no keyword matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    /// Inclusive lower bound, in kilograms.
    pub min: u32,
    /// Inclusive upper bound, in kilograms.
    pub max: u32,
    pub tip: String,
}

/// The top-level structure deserialized from a TOML rule file.
///
/// Example:
/// ```toml
/// [[rules]]
/// id = "tree-planting"
/// keyword = "tree"
/// formula = { kind = "per-tree", factor = 22.0 }
/// tip = "Plant native trees and maintain them for long-term impact."
///
/// [fallback]
/// min = 50
/// max = 150
/// tip = "Try to combine this with waste reduction or tree planting."
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Ordered list of rules. First match wins.
    #[serde(default)]
    pub rules: Vec<EstimationRule>,

    pub fallback: Fallback,
}
