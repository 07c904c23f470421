// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction support
//!
//! Transactions follow the rusqlite pattern:
//! - a transaction rolls back when it goes out of scope unless committed
//! - `commit()` must be called explicitly to persist changes
//! - once committed or rolled back, the transaction refuses further work
//!
//! A [`Transaction`] borrows its [`Session`] and every operation takes
//! `&mut self`, so one transaction is only ever driven by one flow of control.
//! Sharing it across threads requires moving it, which the borrow checker
//! already serializes; no locking is involved.
//!
//! A failed `COMMIT` leaves the transaction active. The caller may retry the
//! commit or roll back explicitly; if it does neither, the drop behavior
//! applies as for any unfinished transaction.

use crate::connection::Session;
use crate::engine::QueryResult;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Statements may be executed; commit or rollback still pending
    Active,
    /// Terminal: changes were persisted
    Committed,
    /// Terminal: changes were discarded
    RolledBack,
}

impl TransactionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionState::Active)
    }
}

/// Behavior when a transaction is dropped while still active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropBehavior {
    /// Roll back the transaction (default)
    #[default]
    Rollback,
    /// Commit the transaction; falls back to rollback if the commit fails
    Commit,
    /// Panic unless the thread is already unwinding, in which case roll back
    Panic,
    /// Leave the engine-side transaction open
    Ignore,
}

/// Represents an active database transaction
///
/// # Examples
///
/// ```no_run
/// # fn run(session: &graphlite_sdk::Session) -> graphlite_sdk::Result<()> {
/// let mut tx = session.transaction()?;
/// tx.execute("INSERT (:Person {name: 'Alice'})")?;
/// let result = tx.query("MATCH (p:Person) RETURN count(p) AS count")?;
/// tx.commit()?;
/// # Ok(())
/// # }
/// ```
pub struct Transaction<'session> {
    session: &'session Session,
    state: TransactionState,
    drop_behavior: DropBehavior,
}

impl<'session> Transaction<'session> {
    /// Send the begin statement and return the active transaction
    ///
    /// Called by `Session::transaction()`. If the engine rejects the begin
    /// statement no transaction is created.
    pub(crate) fn begin(session: &'session Session, drop_behavior: DropBehavior) -> Result<Self> {
        session
            .dispatch_execute(&session.config().begin_statement)
            .map_err(|e| Error::Transaction(format!("Failed to begin transaction: {}", e)))?;
        log::debug!("Began transaction in session {}", session.id());

        Ok(Transaction {
            session,
            state: TransactionState::Active,
            drop_behavior,
        })
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// The session this transaction runs in
    pub fn session(&self) -> &'session Session {
        self.session
    }

    /// Execute a GQL statement within this transaction
    pub fn execute(&mut self, statement: &str) -> Result<()> {
        self.ensure_active()?;
        self.session
            .dispatch_execute(statement)
            .map_err(|e| Error::Transaction(format!("Execute failed: {}", e)))
    }

    /// Execute a query within this transaction and return results
    pub fn query(&mut self, query: &str) -> Result<QueryResult> {
        self.ensure_active()?;
        self.session
            .dispatch_query(query)
            .map_err(|e| Error::Transaction(format!("Query failed: {}", e)))
    }

    /// Commit the transaction
    ///
    /// Fails if the transaction is already finished. If the engine rejects
    /// the commit the transaction stays active.
    pub fn commit(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.session
            .dispatch_execute(&self.session.config().commit_statement)
            .map_err(|e| Error::Transaction(format!("Failed to commit: {}", e)))?;

        self.state = TransactionState::Committed;
        log::debug!("Committed transaction in session {}", self.session.id());
        Ok(())
    }

    /// Roll back the transaction
    ///
    /// A no-op once the transaction is committed or rolled back. This runs
    /// automatically when an active transaction is dropped, so calling it
    /// explicitly is rarely needed.
    pub fn rollback(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }

        self.session
            .dispatch_execute(&self.session.config().rollback_statement)
            .map_err(|e| Error::Transaction(format!("Failed to rollback: {}", e)))?;

        self.state = TransactionState::RolledBack;
        log::debug!("Rolled back transaction in session {}", self.session.id());
        Ok(())
    }

    /// Set the behavior when this transaction is dropped while active
    pub fn set_drop_behavior(&mut self, behavior: DropBehavior) {
        self.drop_behavior = behavior;
    }

    pub fn drop_behavior(&self) -> DropBehavior {
        self.drop_behavior
    }

    fn ensure_active(&self) -> Result<()> {
        match self.state {
            TransactionState::Active => Ok(()),
            TransactionState::Committed => Err(Error::Transaction(
                "Transaction already committed".to_string(),
            )),
            TransactionState::RolledBack => Err(Error::Transaction(
                "Transaction already rolled back".to_string(),
            )),
        }
    }

    // Errors here never reach the caller.
    fn rollback_on_drop(&mut self) {
        if let Err(e) = self.rollback() {
            log::warn!(
                "Failed to rollback transaction on drop in session {}: {}",
                self.session.id(),
                e
            );
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.state.is_terminal() {
            return;
        }

        match self.drop_behavior {
            DropBehavior::Rollback => self.rollback_on_drop(),
            DropBehavior::Commit => {
                if let Err(e) = self.commit() {
                    log::warn!(
                        "Failed to commit transaction on drop in session {}: {}",
                        self.session.id(),
                        e
                    );
                    self.rollback_on_drop();
                }
            }
            DropBehavior::Panic => {
                if std::thread::panicking() {
                    self.rollback_on_drop();
                } else {
                    panic!("Transaction dropped without explicit commit or rollback");
                }
            }
            DropBehavior::Ignore => {
                log::debug!(
                    "Leaving transaction open on drop in session {}",
                    self.session.id()
                );
            }
        }
    }
}
