//! System-level modules
//!
//! Process-wide concerns that are not part of the request path:
//! logging initialization.

pub mod logging;

pub use logging::init_logging;
