// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sync client timing configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::client::SyncStatus;

/// Timing knobs of the sync client.
///
/// Every field has a default, so a partial document overrides only what it
/// names:
///
/// ```rust
/// use tessera_sync::SyncConfig;
///
/// let config = SyncConfig::from_json(r#"{ "recoveryIntervalMs": 500 }"#).unwrap();
/// assert_eq!(config.recovery_interval_ms, 500);
/// assert_eq!(config.new_entries_interval_ms, 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Flush interval while idle.
    pub new_entries_interval_ms: u64,
    /// Retry interval after a transport failure.
    pub recovery_interval_ms: u64,
    /// Retry interval once failures are surfaced.
    pub error_interval_ms: u64,
    /// Consecutive transport failures tolerated in `recovering` before
    /// moving to `error`.
    pub max_recovery_attempts: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            new_entries_interval_ms: 1000,
            recovery_interval_ms: 2000,
            error_interval_ms: 5000,
            max_recovery_attempts: 5,
        }
    }
}

impl SyncConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns how long to wait before the next flush attempt in `status`.
    #[must_use]
    pub fn interval_for(&self, status: SyncStatus) -> Duration {
        Duration::from_millis(match status {
            SyncStatus::Idle | SyncStatus::Sending => self.new_entries_interval_ms,
            SyncStatus::Recovering => self.recovery_interval_ms,
            SyncStatus::Error => self.error_interval_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_per_status() {
        let config = SyncConfig::default();
        assert_eq!(
            config.interval_for(SyncStatus::Idle),
            Duration::from_millis(1000)
        );
        assert_eq!(
            config.interval_for(SyncStatus::Recovering),
            Duration::from_millis(2000)
        );
        assert_eq!(
            config.interval_for(SyncStatus::Error),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(SyncConfig::from_json(r#"{ "errorIntervalMs": "soon" }"#).is_err());
        assert_eq!(SyncConfig::from_json("{}").unwrap(), SyncConfig::default());
    }
}
