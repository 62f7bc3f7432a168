//! # Core Models Module
//!
//! Data structures used to represent a parsed protein structure.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with coordinates, occupancy and alternate location
//! - [`residue`] - Residue records and the standard amino acid lookup
//! - [`chain`] - Chain organization in file order
//! - [`system`] - Complete molecular system owning all components
//! - [`ids`] - Stable slot-map keys for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use ramachandran::core::models::{system::MolecularSystem, atom::Atom};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA", false)?;
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
