// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database connection and session management
//!
//! This module provides the main entry points for working with GraphLite databases.
//! It follows a similar pattern to rusqlite (SQLite's Rust bindings) but adapted
//! for graph databases.

use crate::config::SdkConfig;
use crate::engine::{Engine, OpenEngine, QueryResult};
use crate::error::{Error, Result};
use crate::query::QueryBuilder;
use crate::transaction::{DropBehavior, Transaction};
use std::path::Path;
use std::sync::Arc;

/// Main entry point for GraphLite database operations
///
/// Represents an open database. Sessions created from it share the same
/// engine handle and configuration.
///
/// # Examples
///
/// ```no_run
/// use graphlite_sdk::GraphLite;
/// # use graphlite_sdk::engine::OpenEngine;
/// # fn run<E: OpenEngine>() -> Result<(), graphlite_sdk::Error> {
/// let db = GraphLite::open::<E, _>("./mydb")?;
/// let session = db.session("admin")?;
/// let result = session.query("MATCH (n:Person) RETURN n")?;
/// # Ok(())
/// # }
/// ```
pub struct GraphLite {
    engine: Arc<dyn Engine>,
    config: Arc<SdkConfig>,
}

impl GraphLite {
    /// Open the database at `path` with the default configuration
    pub fn open<E: OpenEngine, P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config::<E, P>(path, SdkConfig::default())
    }

    /// Open the database at `path` with an explicit configuration
    pub fn open_with_config<E: OpenEngine, P: AsRef<Path>>(
        path: P,
        config: SdkConfig,
    ) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref();
        let engine = E::open(path)
            .map_err(|e| Error::Connection(format!("Failed to open database: {}", e)))?;
        log::debug!("Opened database at {}", path.display());
        Ok(GraphLite {
            engine: Arc::new(engine),
            config: Arc::new(config),
        })
    }

    /// Wrap an engine the caller has already opened
    pub fn from_engine(engine: Arc<dyn Engine>) -> Self {
        GraphLite {
            engine,
            config: Arc::new(SdkConfig::default()),
        }
    }

    /// Replace the configuration used by sessions created afterwards
    pub fn with_config(mut self, config: SdkConfig) -> Result<Self> {
        config.validate()?;
        self.config = Arc::new(config);
        Ok(self)
    }

    /// Create a new session for the given user
    ///
    /// Sessions provide user context for permissions and security. Each session
    /// maintains its own transaction state on the engine side.
    pub fn session(&self, username: &str) -> Result<Session> {
        let session_id = self
            .engine
            .create_session(username)
            .map_err(|e| Error::Session(format!("Failed to create session: {}", e)))?;
        log::debug!("Created session {} for user '{}'", session_id, username);

        Ok(Session {
            id: session_id,
            username: username.to_string(),
            engine: self.engine.clone(),
            config: self.config.clone(),
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Direct access to the underlying engine
    ///
    /// An escape hatch for operations the SDK does not cover.
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Close the database and release engine resources
    pub fn close(self) -> Result<()> {
        self.engine
            .close()
            .map_err(|e| Error::Connection(format!("Failed to close database: {}", e)))?;
        log::debug!("Closed database");
        Ok(())
    }
}

/// Represents an active database session
///
/// A session binds a session identifier and a username to the engine handle.
/// It is the factory for [`Transaction`] and [`QueryBuilder`].
///
/// A session and anything borrowed from it are meant to be driven by one flow
/// of control at a time. Separate sessions over the same database may run
/// concurrently; how the engine interleaves them is engine-defined.
pub struct Session {
    id: String,
    username: String,
    engine: Arc<dyn Engine>,
    config: Arc<SdkConfig>,
}

impl Session {
    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the username associated with this session
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Execute a GQL query in this session
    ///
    /// For multi-statement operations that need atomicity, use
    /// [`Session::transaction`] instead.
    pub fn query(&self, query: &str) -> Result<QueryResult> {
        self.dispatch_query(query)
            .map_err(|e| Error::Query(format!("Query failed: {}", e)))
    }

    /// Execute a statement without returning results
    ///
    /// Useful for DDL (CREATE SCHEMA, CREATE GRAPH, ...) and for DML whose
    /// rows are not needed.
    pub fn execute(&self, statement: &str) -> Result<()> {
        self.dispatch_execute(statement)
            .map_err(|e| Error::Query(format!("Execute failed: {}", e)))
    }

    /// Begin a new transaction
    ///
    /// The transaction rolls back when it goes out of scope unless
    /// `commit()` was called. The configured default drop behavior is either
    /// `Rollback` or `Panic` (which also rolls back while unwinding); opting
    /// out of the rollback is only possible per transaction, through
    /// [`Session::transaction_with`].
    ///
    /// ```no_run
    /// # fn run(session: &graphlite_sdk::Session) -> graphlite_sdk::Result<()> {
    /// let mut tx = session.transaction()?;
    /// tx.execute("INSERT (:Person {name: 'Alice'})")?;
    /// tx.execute("INSERT (:Person {name: 'Bob'})")?;
    /// tx.commit()?;
    ///
    /// {
    ///     let mut tx = session.transaction()?;
    ///     tx.execute("INSERT (:Person {name: 'Charlie'})")?;
    ///     // dropped here, rolled back
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn transaction(&self) -> Result<Transaction<'_>> {
        Transaction::begin(self, self.config.drop_behavior)
    }

    /// Begin a new transaction with an explicit drop behavior
    ///
    /// With [`DropBehavior::Commit`] or [`DropBehavior::Ignore`] an unfinished
    /// transaction is not rolled back when it goes out of scope.
    pub fn transaction_with(&self, drop_behavior: DropBehavior) -> Result<Transaction<'_>> {
        Transaction::begin(self, drop_behavior)
    }

    /// Get a query builder bound to this session
    pub fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Release the engine-side state of this session
    pub fn close(self) -> Result<()> {
        self.engine
            .close_session(&self.id)
            .map_err(|e| Error::Session(format!("Failed to close session: {}", e)))?;
        log::debug!("Closed session {}", self.id);
        Ok(())
    }

    pub(crate) fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Send a statement to the engine without wrapping the error
    pub(crate) fn dispatch_query(
        &self,
        statement: &str,
    ) -> std::result::Result<QueryResult, crate::engine::EngineError> {
        if self.config.log_statements {
            log::debug!("[{}] query: {}", self.id, statement);
        }
        self.engine.process_query(statement, &self.id)
    }

    pub(crate) fn dispatch_execute(
        &self,
        statement: &str,
    ) -> std::result::Result<(), crate::engine::EngineError> {
        if self.config.log_statements {
            log::debug!("[{}] execute: {}", self.id, statement);
        }
        self.engine.execute(statement, &self.id)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish()
    }
}
