// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tabular query results returned by the engine

use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Query execution result: ordered column names plus rows keyed by column name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    /// Column names in the order the engine produced them (e.g., ["p.name", "p.age"])
    pub variables: Vec<String>,
    pub execution_time_ms: u64,
    pub rows_affected: usize,
    /// Warnings generated during query execution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty result with the given column names
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add a warning to the query result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Single result row, mapping column names to values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: HashMap<String, Value>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a value by column name
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set_value(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_construction() {
        let mut result = QueryResult::with_columns(["name", "age"]);
        assert!(result.is_empty());
        assert_eq!(result.variables, vec!["name", "age"]);

        result.push_row(Row::from_pairs([
            ("name", Value::from("Alice")),
            ("age", Value::from(30i64)),
        ]));
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].len(), 2);
        assert_eq!(
            result.rows[0].get_value("age"),
            Some(&Value::Number(30.0))
        );
        assert!(result.rows[0].get_value("missing").is_none());
        assert!(!result.has_warnings());

        result.add_warning("duplicate insert ignored".to_string());
        assert!(result.has_warnings());
        assert_eq!(result.warnings, vec!["duplicate insert ignored"]);
    }

    #[test]
    fn test_row_from_values() {
        let mut values = HashMap::new();
        values.insert("count".to_string(), Value::from(6i64));
        let mut row = Row::from_values(values);
        assert_eq!(row.len(), 1);
        assert!(!row.is_empty());

        row.set_value("label".to_string(), Value::from("Person"));
        assert_eq!(row.len(), 2);
        assert_eq!(
            row,
            Row::from_pairs([
                ("count", Value::from(6i64)),
                ("label", Value::from("Person")),
            ])
        );
        assert!(Row::new().is_empty());
    }
}
