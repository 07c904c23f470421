// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result handling and typed deserialization
//!
//! Rows are projected into caller types through serde: each row becomes a
//! JSON object keyed by column name and is deserialized into the target type,
//! so the target's field names must match the result's column names (use
//! `AS` aliases in the query, or `#[serde(rename)]` on the type).

use crate::engine::{QueryResult, Row, Value};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::any::type_name;

/// Wrapper around QueryResult with type-safe accessors
///
/// # Examples
///
/// ```no_run
/// use serde::Deserialize;
/// use graphlite_sdk::TypedResult;
///
/// #[derive(Deserialize, Debug)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// # fn run(session: &graphlite_sdk::Session) -> graphlite_sdk::Result<()> {
/// let result = session.query("MATCH (p:Person) RETURN p.name as name, p.age as age")?;
/// let typed = TypedResult::from(result);
///
/// for person in typed.deserialize_rows::<Person>()? {
///     println!("Person: {:?}", person);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TypedResult {
    inner: QueryResult,
}

impl TypedResult {
    pub fn new(result: QueryResult) -> Self {
        TypedResult { inner: result }
    }

    /// Get the underlying QueryResult
    pub fn inner(&self) -> &QueryResult {
        &self.inner
    }

    /// Consume and get the underlying QueryResult
    pub fn into_inner(self) -> QueryResult {
        self.inner
    }

    pub fn row_count(&self) -> usize {
        self.inner.rows.len()
    }

    /// Column names in the order the engine returned them
    pub fn column_names(&self) -> &[String] {
        &self.inner.variables
    }

    /// Get a row by index, or `None` when out of range
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.inner.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.inner.rows
    }

    /// Values of one column across all rows, in row order
    pub fn column_values(&self, column: &str) -> Vec<Option<&Value>> {
        self.inner
            .rows
            .iter()
            .map(|row| row.get_value(column))
            .collect()
    }

    /// Deserialize a single row into `T`
    ///
    /// Fails if a required field of `T` has no matching column, if a value
    /// cannot be converted to the field's type, or if `T` rejects the row
    /// for any other reason.
    pub fn deserialize_row<T: DeserializeOwned>(&self, row: &Row) -> Result<T> {
        project_row(row).map_err(Error::Serialization)
    }

    /// Deserialize every row into `T`, preserving row order
    ///
    /// The first row that fails aborts the whole batch.
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let mut results = Vec::with_capacity(self.row_count());

        for (index, row) in self.inner.rows.iter().enumerate() {
            let item = project_row(row).map_err(|cause| {
                Error::Serialization(format!(
                    "Row {} of {}: {}",
                    index,
                    self.row_count(),
                    cause
                ))
            })?;
            results.push(item);
        }

        Ok(results)
    }

    /// Deserialize the first row into `T`
    pub fn first<T: DeserializeOwned>(&self) -> Result<T> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::Serialization("No rows returned".to_string()))?;

        self.deserialize_row(row)
    }

    /// Raw value at the first row and first column
    pub fn scalar(&self) -> Result<&Value> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::Serialization("No rows returned".to_string()))?;

        let column = self
            .inner
            .variables
            .first()
            .ok_or_else(|| Error::Serialization("No columns returned".to_string()))?;

        row.get_value(column).ok_or_else(|| {
            Error::Serialization(format!("Column '{}' not found in first row", column))
        })
    }

    /// Value at the first row and first column, converted to `T`
    pub fn scalar_as<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.scalar()?;
        serde_json::from_value(value.to_json()).map_err(|e| {
            Error::Serialization(format!(
                "Failed to convert scalar {} into {}: {}",
                value,
                type_name::<T>(),
                e
            ))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.inner.rows.is_empty()
    }
}

impl From<QueryResult> for TypedResult {
    fn from(result: QueryResult) -> Self {
        TypedResult::new(result)
    }
}

fn row_to_json(row: &Row) -> serde_json::Value {
    serde_json::Value::Object(
        row.values
            .iter()
            .map(|(column, value)| (column.clone(), value.to_json()))
            .collect(),
    )
}

fn project_row<T: DeserializeOwned>(row: &Row) -> std::result::Result<T, String> {
    let json = row_to_json(row);
    serde_json::from_value(json.clone()).map_err(|e| {
        format!(
            "Failed to deserialize row {} into {}: {}",
            json,
            type_name::<T>(),
            e
        )
    })
}
