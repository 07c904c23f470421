// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Staging in-memory engine used by the integration tests
//!
//! Understands just enough statements to observe transaction effects:
//! - `BEGIN TRANSACTION`, `COMMIT`, `ROLLBACK`
//! - `INSERT (:Label {key: value, ...})`
//! - `MATCH (p:Label) RETURN count(p) AS count`
//! - `MATCH (p:Label) ... RETURN p.name AS name, p.age AS age` (insertion order)
//!
//! Inserts made inside a transaction are only visible to their own session
//! until committed. Anything else is rejected with a syntax error.

#![allow(dead_code)]

use graphlite_sdk::engine::{Engine, EngineError, OpenEngine, QueryResult, Row, Value};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct Record {
    label: String,
    properties: HashMap<String, Value>,
}

#[derive(Default)]
struct SessionState {
    staged: Option<Vec<Record>>,
}

#[derive(Default)]
struct Store {
    committed: Vec<Record>,
    sessions: HashMap<String, SessionState>,
    closed: bool,
}

pub struct StagingEngine {
    store: Mutex<Store>,
}

impl OpenEngine for StagingEngine {
    fn open(path: &Path) -> Result<Self, EngineError> {
        if path.is_file() {
            return Err(EngineError::new(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        std::fs::create_dir_all(path).map_err(|e| EngineError::new(e.to_string()))?;
        Ok(StagingEngine {
            store: Mutex::new(Store::default()),
        })
    }
}

impl Engine for StagingEngine {
    fn create_session(&self, username: &str) -> Result<String, EngineError> {
        if username.trim().is_empty() {
            return Err(EngineError::new("username must not be empty"));
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .lock()
            .sessions
            .insert(id.clone(), SessionState::default());
        Ok(id)
    }

    fn process_query(&self, statement: &str, session_id: &str) -> Result<QueryResult, EngineError> {
        let mut store = self.store.lock();
        if store.closed {
            return Err(EngineError::new("database is closed"));
        }
        let statement = statement.trim();

        match statement {
            "BEGIN TRANSACTION" => {
                let session = session_mut(&mut store, session_id)?;
                if session.staged.is_some() {
                    return Err(EngineError::new("transaction already active"));
                }
                session.staged = Some(Vec::new());
                Ok(QueryResult::new())
            }
            "COMMIT" => {
                let staged = session_mut(&mut store, session_id)?
                    .staged
                    .take()
                    .ok_or_else(|| EngineError::new("no active transaction"))?;
                let affected = staged.len();
                store.committed.extend(staged);
                Ok(affected_result(affected))
            }
            "ROLLBACK" => {
                session_mut(&mut store, session_id)?
                    .staged
                    .take()
                    .ok_or_else(|| EngineError::new("no active transaction"))?;
                Ok(QueryResult::new())
            }
            _ if statement.starts_with("INSERT ") => {
                let record = parse_insert(statement)?;
                let in_transaction = session_mut(&mut store, session_id)?.staged.is_some();
                if in_transaction {
                    session_mut(&mut store, session_id)?
                        .staged
                        .get_or_insert_with(Vec::new)
                        .push(record);
                } else {
                    store.committed.push(record);
                }
                Ok(affected_result(1))
            }
            _ if statement.starts_with("MATCH ") => {
                let label = parse_label(statement)?;
                let visible = visible_records(&store, session_id, &label)?;
                if statement.contains("count(") {
                    let mut result = QueryResult::with_columns(["count"]);
                    let count = Value::from(visible.len() as i64);
                    result.push_row(Row::from_pairs([("count", count)]));
                    Ok(result)
                } else {
                    let mut result = QueryResult::with_columns(["name", "age"]);
                    for record in visible {
                        let mut row = Row::new();
                        for column in ["name", "age"] {
                            let value = record
                                .properties
                                .get(column)
                                .cloned()
                                .unwrap_or(Value::Null);
                            row.set_value(column.to_string(), value);
                        }
                        result.push_row(row);
                    }
                    Ok(result)
                }
            }
            _ => Err(EngineError::new(format!("syntax error near '{}'", statement))),
        }
    }

    fn close_session(&self, session_id: &str) -> Result<(), EngineError> {
        self.store
            .lock()
            .sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| EngineError::new(format!("unknown session {}", session_id)))
    }

    fn close(&self) -> Result<(), EngineError> {
        self.store.lock().closed = true;
        Ok(())
    }
}

fn session_mut<'a>(
    store: &'a mut Store,
    session_id: &str,
) -> Result<&'a mut SessionState, EngineError> {
    store
        .sessions
        .get_mut(session_id)
        .ok_or_else(|| EngineError::new(format!("unknown session {}", session_id)))
}

fn visible_records(
    store: &Store,
    session_id: &str,
    label: &str,
) -> Result<Vec<Record>, EngineError> {
    let session = store
        .sessions
        .get(session_id)
        .ok_or_else(|| EngineError::new(format!("unknown session {}", session_id)))?;
    Ok(store
        .committed
        .iter()
        .chain(session.staged.iter().flatten())
        .filter(|r| r.label == label)
        .cloned()
        .collect())
}

fn affected_result(rows_affected: usize) -> QueryResult {
    QueryResult {
        rows_affected,
        ..QueryResult::new()
    }
}

/// Label from the first `(var:Label ...)` group
fn parse_label(statement: &str) -> Result<String, EngineError> {
    let start = statement
        .find(':')
        .ok_or_else(|| EngineError::new("missing label"))?;
    let rest = &statement[start + 1..];
    let end = rest
        .find(|c: char| c == ')' || c == ' ' || c == '{')
        .unwrap_or(rest.len());
    Ok(rest[..end].to_string())
}

fn parse_insert(statement: &str) -> Result<Record, EngineError> {
    let label = parse_label(statement)?;
    let mut properties = HashMap::new();

    if let (Some(open), Some(close)) = (statement.find('{'), statement.rfind('}')) {
        for pair in statement[open + 1..close].split(',') {
            let (key, raw) = pair
                .split_once(':')
                .ok_or_else(|| EngineError::new(format!("bad property '{}'", pair.trim())))?;
            let raw = raw.trim();
            let value = if let Some(s) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
                Value::from(s)
            } else {
                raw.parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| EngineError::new(format!("bad value '{}'", raw)))?
            };
            properties.insert(key.trim().to_string(), value);
        }
    }

    Ok(Record { label, properties })
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh engine under a temporary directory
pub fn open_db() -> (graphlite_sdk::GraphLite, TempDir) {
    init_logging();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = graphlite_sdk::GraphLite::open::<StagingEngine, _>(temp_dir.path().join("db"))
        .expect("Failed to open database");
    (db, temp_dir)
}
