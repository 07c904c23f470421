// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SDK configuration

use crate::error::{Error, Result};
use crate::transaction::DropBehavior;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by every session opened from one database handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// What a transaction does when it goes out of scope unfinished
    ///
    /// Only `Rollback` and `Panic` are accepted here. `Commit` and `Ignore`
    /// skip the rollback of unfinished work, so they must be chosen per
    /// transaction with `Session::transaction_with`.
    pub drop_behavior: DropBehavior,

    /// Statement sent to start a transaction
    pub begin_statement: String,

    /// Statement sent to commit a transaction
    pub commit_statement: String,

    /// Statement sent to roll back a transaction
    pub rollback_statement: String,

    /// Log every dispatched statement at debug level
    pub log_statements: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            drop_behavior: DropBehavior::Rollback,
            begin_statement: "BEGIN TRANSACTION".to_string(),
            commit_statement: "COMMIT".to_string(),
            rollback_statement: "ROLLBACK".to_string(),
            log_statements: false,
        }
    }
}

impl SdkConfig {
    /// Parse a JSON configuration; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SdkConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the drop behavior and the transaction control statements
    pub fn validate(&self) -> Result<()> {
        if !matches!(
            self.drop_behavior,
            DropBehavior::Rollback | DropBehavior::Panic
        ) {
            return Err(Error::Config(format!(
                "drop_behavior {:?} cannot be a default; use Session::transaction_with",
                self.drop_behavior
            )));
        }
        for (name, statement) in [
            ("begin_statement", &self.begin_statement),
            ("commit_statement", &self.commit_statement),
            ("rollback_statement", &self.rollback_statement),
        ] {
            if statement.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SdkConfig::default();
        assert_eq!(config.drop_behavior, DropBehavior::Rollback);
        assert_eq!(config.begin_statement, "BEGIN TRANSACTION");
        assert_eq!(config.commit_statement, "COMMIT");
        assert_eq!(config.rollback_statement, "ROLLBACK");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SdkConfig::from_json_str(r#"{"drop_behavior": "Panic", "log_statements": true}"#)
                .unwrap();
        assert_eq!(config.drop_behavior, DropBehavior::Panic);
        assert!(config.log_statements);
        assert_eq!(config.commit_statement, "COMMIT");
    }

    #[test]
    fn test_blank_statement_rejected() {
        let err = SdkConfig::from_json_str(r#"{"rollback_statement": "  "}"#).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("rollback_statement")));
    }

    #[test]
    fn test_drop_behavior_without_rollback_rejected() {
        for behavior in ["Commit", "Ignore"] {
            let json = format!(r#"{{"drop_behavior": "{}"}}"#, behavior);
            let err = SdkConfig::from_json_str(&json).unwrap_err();
            assert!(matches!(err, Error::Config(ref msg) if msg.contains(behavior)));
        }

        let config = SdkConfig {
            drop_behavior: DropBehavior::Ignore,
            ..SdkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sdk.json");
        std::fs::write(&path, r#"{"begin_statement": "START TRANSACTION"}"#).unwrap();

        let config = SdkConfig::from_file(&path).unwrap();
        assert_eq!(config.begin_statement, "START TRANSACTION");

        let missing = SdkConfig::from_file(temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SdkConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
