//! Stable vocabulary shared across the fieldguard workspace.
//!
//! This crate is intentionally boring:
//! - error types separating data errors from configuration errors
//! - the fixed error-message grammar
//! - canonical dotted field-path handling
//! - the serializable report envelope

#![forbid(unsafe_code)]

pub mod error;
pub mod messages;
pub mod path;
pub mod report;

pub use error::{ConfigurationError, MetadataError, ValidationError, ValidationFailure};
pub use path::FieldPath;
pub use report::{ValidationReport, SCHEMA_REPORT_V1};
