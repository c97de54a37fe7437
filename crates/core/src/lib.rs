//! Core library for the task ledger service
//!
//! This crate contains the core business logic, including:
//! - Task model and storage
//! - CSV import pipeline with per-row error reporting
//! - CSV export

pub mod error;
pub mod export;
pub mod import;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
