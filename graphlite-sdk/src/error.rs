// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the GraphLite SDK
//!
//! Every variant carries the context of the failing SDK operation followed by
//! the underlying cause (engine message or conversion error), so nothing from
//! the cause is lost when it is wrapped.

use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for GraphLite SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// Opening or closing the database failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Session creation or teardown failed
    #[error("Session error: {0}")]
    Session(String),

    /// Query or statement execution outside a transaction failed
    #[error("Query error: {0}")]
    Query(String),

    /// Any failure of a transaction operation, including misuse of a finished transaction
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// A result could not be projected into the requested type
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid SDK configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors raised by transaction operations
    pub fn is_transaction(&self) -> bool {
        matches!(self, Error::Transaction(_))
    }

    /// True for errors raised while projecting results into typed records
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
