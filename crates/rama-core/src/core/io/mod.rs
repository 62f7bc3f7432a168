//! Provides input functionality for molecular structure file formats.
//!
//! Readers implement the [`traits::StructureFile`] trait so callers can load a
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem) from any
//! buffered reader or path without caring about the concrete format.

pub mod pdb;
pub mod traits;
