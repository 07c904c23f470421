// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query builder for fluent GQL query construction
//!
//! The builder only concatenates fragments. It does not parse or validate
//! them; rejecting a malformed (or empty) statement is left to the engine.

use crate::connection::Session;
use crate::engine::QueryResult;
use crate::error::Result;
use std::fmt;

/// Fluent API for building GQL queries
///
/// Clauses are emitted in a fixed order regardless of the order the setters
/// were called in: MATCH, WHERE, WITH, RETURN, ORDER BY, SKIP, LIMIT.
///
/// # Examples
///
/// ```no_run
/// # fn run(session: &graphlite_sdk::Session) -> graphlite_sdk::Result<()> {
/// let result = session.query_builder()
///     .match_pattern("(p:Person)")
///     .where_clause("p.age > 25")
///     .return_clause("p.name, p.age")
///     .execute()?;
///
/// // Equivalent to:
/// // "MATCH (p:Person) WHERE p.age > 25 RETURN p.name, p.age"
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<'session> {
    session: &'session Session,
    match_patterns: Vec<String>,
    where_clauses: Vec<String>,
    with_clauses: Vec<String>,
    return_clause: Option<String>,
    order_by: Option<String>,
    skip: Option<usize>,
    limit: Option<usize>,
}

impl<'session> QueryBuilder<'session> {
    pub(crate) fn new(session: &'session Session) -> Self {
        QueryBuilder {
            session,
            match_patterns: Vec::new(),
            where_clauses: Vec::new(),
            with_clauses: Vec::new(),
            return_clause: None,
            order_by: None,
            skip: None,
            limit: None,
        }
    }

    /// Add a MATCH pattern (without the MATCH keyword)
    ///
    /// Can be called multiple times; each pattern becomes its own MATCH.
    pub fn match_pattern(mut self, pattern: &str) -> Self {
        self.match_patterns.push(pattern.to_string());
        self
    }

    /// Add a WHERE condition (without the WHERE keyword)
    ///
    /// Can be called multiple times - conditions are AND'ed together.
    pub fn where_clause(mut self, condition: &str) -> Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    /// Add a WITH clause (without the WITH keyword)
    pub fn with_clause(mut self, clause: &str) -> Self {
        self.with_clauses.push(clause.to_string());
        self
    }

    /// Set the RETURN clause, replacing any previous one
    pub fn return_clause(mut self, clause: &str) -> Self {
        self.return_clause = Some(clause.to_string());
        self
    }

    /// Set the ORDER BY clause, replacing any previous one
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_by = Some(clause.to_string());
        self
    }

    /// Skip the first `n` results
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = Some(n);
        self
    }

    /// Return at most `n` results
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the query string without executing
    ///
    /// Returns an empty string when nothing was set.
    pub fn build(&self) -> String {
        let mut query = String::new();

        for pattern in &self.match_patterns {
            if !query.is_empty() {
                query.push(' ');
            }
            query.push_str("MATCH ");
            query.push_str(pattern);
        }

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        for with_clause in &self.with_clauses {
            query.push_str(" WITH ");
            query.push_str(with_clause);
        }

        if let Some(ref return_clause) = self.return_clause {
            query.push_str(" RETURN ");
            query.push_str(return_clause);
        }

        if let Some(ref order_by) = self.order_by {
            query.push_str(" ORDER BY ");
            query.push_str(order_by);
        }

        if let Some(skip) = self.skip {
            query.push_str(&format!(" SKIP {}", skip));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        query.trim().to_string()
    }

    /// Build the query and run it through the owning session
    ///
    /// Errors are whatever [`Session::query`] returns.
    pub fn execute(&self) -> Result<QueryResult> {
        let query = self.build();
        self.session.query(&query)
    }
}

impl fmt::Display for QueryBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
