//! Core functionality module
//!
//! This module contains the core business logic for the capture gallery,
//! including configuration management, error handling, the gallery record
//! list, and the capture / import workflow.
//!
//! # Submodules
//!
//! - `config` - Configuration loading, saving, and management
//! - `error` - Error types and result aliases
//! - `gallery` - The capture / import workflow and its busy state
//! - `record` - Gallery records and the startup directory scan

pub mod config;
pub mod error;
pub mod gallery;
pub mod record;
