//! geoabbr - GIS abbreviation dictionary service
//!
//! Resolves multi-keyword queries against a dictionary of abbreviations,
//! tracks how often each entry is copied, and exposes maintenance operations
//! over HTTP and the command line.
//!
//! # Architecture
//! - `storage`: `EntryStore` trait and the SeaORM backend
//! - `services`: keyword resolution and dictionary operations
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
