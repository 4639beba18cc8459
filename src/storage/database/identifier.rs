//! Validated SQL identifiers
//!
//! Table and column names are interpolated into statements, so they must pass
//! through these types first. Anything that is not a plain identifier is
//! rejected as a validation error.

use crate::utils::error::{EngineError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::DbBackend;
use std::fmt;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier pattern is valid"));

fn validate_identifier(kind: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if IDENTIFIER.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(EngineError::validation(format!(
            "Invalid {} name '{}': expected letters, digits and underscores",
            kind, raw
        )))
    }
}

fn quote(backend: DbBackend, ident: &str) -> String {
    match backend {
        DbBackend::MySql => format!("`{}`", ident),
        _ => format!("\"{}\"", ident),
    }
}

/// A table name safe to place in a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn parse(raw: &str) -> Result<Self> {
        validate_identifier("table", raw).map(Self)
    }

    /// Parse and additionally require membership in `allowed` when it is
    /// non-empty.
    pub fn parse_allowed(raw: &str, allowed: &[String]) -> Result<Self> {
        let table = Self::parse(raw)?;
        if allowed.is_empty() || allowed.iter().any(|t| t == table.as_str()) {
            Ok(table)
        } else {
            Err(EngineError::validation(format!(
                "Table '{}' is not in the allowed table list",
                table
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form for `backend`
    pub fn quoted(&self, backend: DbBackend) -> String {
        quote(backend, &self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column name safe to place in a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn parse(raw: &str) -> Result<Self> {
        validate_identifier("column", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form for `backend`
    pub fn quoted(&self, backend: DbBackend) -> String {
        quote(backend, &self.0)
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
