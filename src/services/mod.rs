//! Service layer for business logic
//!
//! This module provides unified business logic that can be shared between
//! different interfaces (HTTP API, CLI).

mod abbreviation_service;
pub mod resolver;
pub mod seed;

pub use abbreviation_service::*;
pub use resolver::{MAX_RESULTS, Resolution, resolve, split_keywords};
pub use seed::{SAMPLE_ENTRIES, seed_if_empty};
