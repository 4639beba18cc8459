//! Storage collaborators
//!
//! - **database**: relational row store used by the deletion pipeline
//! - **files**: recursive text file discovery used by the word frequency pipeline

pub mod database;
pub mod files;

pub use database::{ColumnName, RowStore, SeaOrmRowStore, TableName};
pub use files::walk_files;
