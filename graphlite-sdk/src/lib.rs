// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphLite SDK - High-level ergonomic Rust API for embedded GQL engines
//!
//! This crate sits between application code and an embedded graph engine.
//! It provides session-scoped statement execution, transactions that roll
//! back unless committed, a fluent query builder and typed result mapping.
//!
//! # Quick Start
//!
//! ```no_run
//! use graphlite_sdk::{GraphLite, TypedResult};
//! # use graphlite_sdk::engine::OpenEngine;
//!
//! # fn run<E: OpenEngine>() -> Result<(), graphlite_sdk::Error> {
//! let db = GraphLite::open::<E, _>("./mydb")?;
//! let session = db.session("admin")?;
//!
//! let mut tx = session.transaction()?;
//! tx.execute("INSERT (:Person {name: 'Alice', age: 30})")?;
//! tx.commit()?;
//!
//! let result = session.query("MATCH (p:Person) RETURN count(p) AS count")?;
//! let count = TypedResult::from(result).scalar_as::<i64>()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code (Your Rust App)      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  GraphLite SDK (this crate)             │
//! │  - GraphLite (database handle)          │
//! │  - Session (session management)         │
//! │  - QueryBuilder (fluent queries)        │
//! │  - Transaction (commit / rollback)      │
//! │  - TypedResult (deserialization)        │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  Engine (implements engine::Engine)     │
//! │  - sessions                             │
//! │  - statement execution                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`engine`] - Engine boundary, tabular results and values
//! - [`connection`] - Database handle and session management
//! - [`query`] - Query builder
//! - [`transaction`] - Transaction support
//! - [`result`] - Result handling and deserialization
//! - [`config`] - SDK configuration
//! - [`error`] - Error types and handling

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod query;
pub mod result;
pub mod transaction;

pub use config::SdkConfig;
pub use connection::{GraphLite, Session};
pub use engine::{Engine, EngineError, OpenEngine, QueryResult, Row, Value};
pub use error::{Error, Result};
pub use query::QueryBuilder;
pub use result::TypedResult;
pub use transaction::{DropBehavior, Transaction, TransactionState};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
