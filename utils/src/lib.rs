//! Shared utilities for the tenure ledger.

pub mod format;
pub mod logging;
pub mod time;

pub use format::format_thousands;
pub use logging::{init_logging, LogFormat};
pub use time::{format_duration, CivilDateTime};
