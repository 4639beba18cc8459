//! Error handling for the engine
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{EngineError, Result};
