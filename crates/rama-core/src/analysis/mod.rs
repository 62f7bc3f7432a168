//! # Analysis Module
//!
//! The pure angle-extraction-and-classification pipeline.
//!
//! - [`segments`] - Partition chains into peptide-bonded segments
//! - [`torsion`] - Backbone phi/psi per residue and the flat [`AngleSample`](torsion::AngleSample) list
//! - [`region`] - The four-way Ramachandran region classifier
//! - [`summary`] - Classification of a whole sample set and per-region statistics
//!
//! Nothing here touches the filesystem; every function is deterministic in its inputs.

pub mod error;
pub mod region;
pub mod segments;
pub mod summary;
pub mod torsion;
