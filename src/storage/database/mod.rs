//! Relational store access
//!
//! The engine only talks to [`RowStore`]; [`SeaOrmRowStore`] is the
//! production implementation.

pub mod identifier;
pub mod row_store;
pub mod seaorm_db;

pub use identifier::{ColumnName, TableName};
pub use row_store::RowStore;
pub use seaorm_db::SeaOrmRowStore;
