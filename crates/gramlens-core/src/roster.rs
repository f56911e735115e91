//! Competitor roster configuration.
//!
//! The roster is the curated pool of comparable accounts that competitor
//! discovery draws from. It lives in a YAML file so the pool can be edited
//! without a rebuild.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorEntry {
    /// Bare account handle, no `@` prefix.
    pub handle: String,
    /// Lowercase niche tags used for keyword ranking.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitorRoster {
    pub competitors: Vec<CompetitorEntry>,
}

/// Load and validate the competitor roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_roster(path: &Path) -> Result<CompetitorRoster, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster: CompetitorRoster = serde_yaml::from_str(&content)?;

    validate_roster(&roster)?;

    Ok(roster)
}

fn validate_roster(roster: &CompetitorRoster) -> Result<(), ConfigError> {
    if roster.competitors.is_empty() {
        return Err(ConfigError::Validation(
            "competitor roster must list at least one account".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for entry in &roster.competitors {
        if entry.handle.trim().is_empty() {
            return Err(ConfigError::Validation(
                "competitor handle must be non-empty".to_string(),
            ));
        }

        if !entry
            .handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "competitor handle '{}' must be a bare handle (letters, digits, '.', '_')",
                entry.handle
            )));
        }

        if !seen.insert(entry.handle.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate competitor handle: '{}'",
                entry.handle
            )));
        }
    }

    Ok(())
}
