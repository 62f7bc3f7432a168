//! Persisted artifacts of a Ramachandran analysis.
//!
//! - [`report`] writes the per-sample and per-region CSV tables.
//! - [`density`] estimates the background density layer of the plot.
//! - [`plot`] renders the annotated scatter plot as SVG.

pub mod density;
pub mod plot;
pub mod report;
