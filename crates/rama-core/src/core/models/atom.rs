use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom of a parsed structure.
///
/// Only the fields needed for backbone geometry and conformer selection are kept.
/// Chemistry (elements, charges, force field types) is deliberately not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy of this conformer, in `[0, 1]`.
    pub occupancy: f64,
    /// Alternate location indicator, if the record carried one.
    pub alt_loc: Option<char>,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy and no alternate location.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            residue_id,
            position,
            occupancy: 1.0,
            alt_loc: None,
        }
    }

    /// Returns `true` if `self` should replace `existing` as the representative
    /// conformer for an atom name.
    ///
    /// Higher occupancy wins; on a tie the conformer read first is kept.
    pub fn supersedes(&self, existing: &Atom) -> bool {
        self.occupancy > existing.occupancy
    }
}
