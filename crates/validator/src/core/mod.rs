//! Core types: violations and the fatal error taxonomy.

mod error;

pub use error::{CheckError, CheckResult, FieldAccessError, Violation, join_messages};
