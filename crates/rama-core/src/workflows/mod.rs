//! # Workflows Module
//!
//! High-level entry points that run the complete Ramachandran pipeline on one
//! structure file: parse, segment, extract torsions, classify, summarize, write
//! both CSV tables and render the plot.
//!
//! - [`ramachandran`] - The `analyze` and `run` pipeline functions
//! - [`config`] - Validated run configuration and its builder
//! - [`progress`] - Synchronous progress events for interface layers
//! - [`error`] - The error returned by a failed run
//!
//! Each call is independent; nothing is cached between invocations except the
//! output files that are overwritten on disk.

pub mod config;
pub mod error;
pub mod progress;
pub mod ramachandran;
