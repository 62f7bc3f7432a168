//! # Ramachandran Core Library
//!
//! Extracts backbone dihedral angles (phi, psi) from protein structures, classifies
//! every angle pair into a favorability region, and produces tabular reports and a
//! density-annotated Ramachandran plot.
//!
//! ## Architectural Philosophy
//!
//! The library is split into layers with a clear separation of concerns:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), the PDB
//!   reader, and pure geometry helpers.
//!
//! - **[`analysis`]: The Logic Core.** Peptide segmentation, torsion extraction, region
//!   classification, and per-region aggregation. Every function here is pure.
//!
//! - **[`output`]: Artifacts.** Typed CSV tables, the kernel density grid, and the SVG
//!   plot renderer.
//!
//! - **[`workflows`]: The Public API.** Ties the layers together into a single
//!   `(file_path, config) -> Result<Report, Error>` pipeline that holds no state between
//!   invocations.

pub mod analysis;
pub mod core;
pub mod output;
pub mod workflows;
