use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Key identifying a residue within a chain: record kind, sequence number and
/// insertion code. HETATM groups never merge into a polymer residue that
/// shares their number.
type ResidueKey = (ChainId, bool, isize, Option<char>);

/// Represents a complete molecular system with atoms, residues, and chains.
///
/// This struct is the central data structure produced by the structure readers.
/// Chains are kept in the order they were first seen, and each chain keeps its
/// residues in file order, which is what backbone walks rely on.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chain IDs in the order they were added.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, hetero flag, residue number and insertion code.
    residue_id_map: HashMap<ResidueKey, ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in the system.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the system.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in the order they were added.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ChainId, &Chain)` pairs.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain, hetero flag, residue number and insertion code.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `is_hetero` - Whether the residue was read from HETATM records.
    /// * `residue_number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, `None` for plain residues.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        is_hetero: bool,
        residue_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, is_hetero, residue_number, insertion_code))
            .copied()
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; records of the same chain identifier that appear
    /// after a `TER` record continue the existing chain.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to the system or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the same chain, hetero flag,
    /// number and insertion code already exists, its ID is returned unchanged.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, is_hetero, residue_number, insertion_code);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue = Residue::new(residue_number, insertion_code, name, is_hetero, chain_id);
        let residue_id = self.residues.insert(residue);
        self.residue_id_map.insert(key, residue_id);
        chain.residues.push(residue_id);

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// If the residue already holds an atom with the same name (an alternate
    /// location), the conformer with the higher occupancy is kept and the other is
    /// discarded.
    ///
    /// # Return
    ///
    /// Returns the ID of the atom now representing that name in the residue, or
    /// `None` if the residue doesn't exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let existing_id = self
            .residues
            .get(residue_id)?
            .get_atom_id_by_name(&atom.name);

        if let Some(existing_id) = existing_id {
            let keep_new = self
                .atoms
                .get(existing_id)
                .is_none_or(|existing| atom.supersedes(existing));
            if !keep_new {
                return Some(existing_id);
            }
            let name = atom.name.clone();
            self.atoms.remove(existing_id);
            let new_id = self.atoms.insert(atom);
            self.residues[residue_id].replace_atom(&name, existing_id, new_id);
            return Some(new_id);
        }

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Returns the position of a named atom within a residue.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The residue to look in.
    /// * `atom_name` - The atom name, e.g. `"CA"`.
    pub fn atom_position(&self, residue_id: ResidueId, atom_name: &str) -> Option<Point3<f64>> {
        let atom_id = self.residue(residue_id)?.get_atom_id_by_name(atom_name)?;
        self.atom(atom_id).map(|atom| atom.position)
    }
}
