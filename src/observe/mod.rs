//! Observability: structured event logging.

pub mod logger;

pub use logger::{Logger, Severity};
