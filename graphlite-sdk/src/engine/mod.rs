// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Boundary with the embedded graph engine
//!
//! The SDK never parses statements. Everything it sends, including the
//! transaction control statements, goes through [`Engine::process_query`] as
//! an opaque string tagged with the session identifier.
//!
//! Engines are shared between sessions through `Arc<dyn Engine>`, so
//! implementations must be `Send + Sync`. Whether the engine serializes work
//! coming from different sessions is up to the engine.

pub mod result;
pub mod value;

pub use result::{QueryResult, Row};
pub use value::{Edge, Node, Value};

use std::path::Path;
use thiserror::Error;

/// Failure reported by the engine
///
/// Only the engine's message is kept; the SDK wraps it into its own error
/// kinds with operation context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for EngineError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for EngineError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Statement execution primitives of an open database
pub trait Engine: Send + Sync {
    /// Create a session for `username`, returning its identifier
    fn create_session(&self, username: &str) -> Result<String, EngineError>;

    /// Run a statement in the given session and return its tabular result
    fn process_query(&self, statement: &str, session_id: &str) -> Result<QueryResult, EngineError>;

    /// Run a statement whose rows are not needed
    fn execute(&self, statement: &str, session_id: &str) -> Result<(), EngineError> {
        self.process_query(statement, session_id).map(|_| ())
    }

    /// Release the engine-side state of a session
    fn close_session(&self, _session_id: &str) -> Result<(), EngineError> {
        Ok(())
    }

    /// Release the database
    fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Engines that can be opened from a database path
pub trait OpenEngine: Engine + Sized + 'static {
    fn open(path: &Path) -> Result<Self, EngineError>;
}
