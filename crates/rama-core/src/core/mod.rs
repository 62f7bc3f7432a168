//! # Core Module
//!
//! Fundamental building blocks shared by the rest of the library.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the
//!   [`MolecularSystem`](models::system::MolecularSystem) that owns them
//! - **File I/O** ([`io`]) - Reading coordinate files into a molecular system
//! - **Geometry** ([`utils`]) - Distances and torsion angles over `nalgebra` points

pub mod io;
pub mod models;
pub mod utils;
