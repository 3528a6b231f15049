//! # Market Pulse Dashboard Common Library
//!
//! Shared code for the dashboard service:
//! - Parameter set and artifact models
//! - SQLite persistence (parameter sets, artifacts)
//! - Configuration loading
//! - Utility functions

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{Artifact, ArtifactKind, ArtifactPayload, NewParameterSet, ParameterSet};
