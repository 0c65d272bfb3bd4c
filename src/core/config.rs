//! Rules configuration.
//!
//! Defaults reproduce the documented ruleset. Variants exist only where the
//! documented behavior leaves a table rule open:
//! - `SafeCellRule`: whether opposing pieces may share a safe cell
//! - `advance_in_home_lane`: whether pieces keep moving once in the lane
//!
//! Configs can be built in code or loaded from JSON:
//!
//! ```
//! use ludo_engine::core::{RulesConfig, SafeCellRule};
//!
//! let config = RulesConfig::from_json(r#"{ "safe_cell_rule": "guarded" }"#).unwrap();
//! assert_eq!(config.safe_cell_rule, SafeCellRule::Guarded);
//! assert!(!config.advance_in_home_lane);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse rules config: {0}")]
    Json(#[from] serde_json::Error),
}

/// How safe cells treat opposing pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeCellRule {
    /// Any piece may land on a safe cell; nobody there is captured.
    #[default]
    Sanctuary,
    /// Landing on a safe cell held by an opposing piece is illegal.
    Guarded,
}

/// Table rules for a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Safe-cell landing policy.
    pub safe_cell_rule: SafeCellRule,

    /// Let home-lane pieces advance by exact rolls up to the finish.
    ///
    /// Off by default: a piece that enters the lane stays where it lands.
    pub advance_in_home_lane: bool,
}

impl RulesConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the safe-cell policy.
    #[must_use]
    pub fn with_safe_cell_rule(mut self, rule: SafeCellRule) -> Self {
        self.safe_cell_rule = rule;
        self
    }

    /// Allow movement inside the home lane.
    #[must_use]
    pub fn with_home_lane_advance(mut self) -> Self {
        self.advance_in_home_lane = true;
        self
    }
}
