use super::ids::{AtomId, ChainId};
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)
    Methionine, // Methionine (MET)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG)
    Histidine, // Histidine (HIS)
    Lysine,    // Lysine (LYS)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)
}

static STANDARD_RESIDUES: Map<&'static str, ResidueType> = phf_map! {
    "ALA" => ResidueType::Alanine,
    "GLY" => ResidueType::Glycine,
    "ILE" => ResidueType::Isoleucine,
    "LEU" => ResidueType::Leucine,
    "PRO" => ResidueType::Proline,
    "VAL" => ResidueType::Valine,
    "PHE" => ResidueType::Phenylalanine,
    "TRP" => ResidueType::Tryptophan,
    "TYR" => ResidueType::Tyrosine,
    "ASN" => ResidueType::Asparagine,
    "CYS" => ResidueType::Cysteine,
    "GLN" => ResidueType::Glutamine,
    "SER" => ResidueType::Serine,
    "THR" => ResidueType::Threonine,
    "MET" => ResidueType::Methionine,
    "ARG" => ResidueType::Arginine,
    "HIS" => ResidueType::Histidine,
    "LYS" => ResidueType::Lysine,
    "ASP" => ResidueType::AsparticAcid,
    "GLU" => ResidueType::GlutamicAcid,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a standard amino acid residue name")]
pub struct ParseResidueTypeError(pub String);

impl FromStr for ResidueType {
    type Err = ParseResidueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD_RESIDUES
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| ParseResidueTypeError(s.to_string()))
    }
}

impl ResidueType {
    pub fn to_three_letter(&self) -> &'static str {
        match self {
            ResidueType::Alanine => "ALA",
            ResidueType::Glycine => "GLY",
            ResidueType::Isoleucine => "ILE",
            ResidueType::Leucine => "LEU",
            ResidueType::Proline => "PRO",
            ResidueType::Valine => "VAL",
            ResidueType::Phenylalanine => "PHE",
            ResidueType::Tryptophan => "TRP",
            ResidueType::Tyrosine => "TYR",
            ResidueType::Asparagine => "ASN",
            ResidueType::Cysteine => "CYS",
            ResidueType::Glutamine => "GLN",
            ResidueType::Serine => "SER",
            ResidueType::Threonine => "THR",
            ResidueType::Methionine => "MET",
            ResidueType::Arginine => "ARG",
            ResidueType::Histidine => "HIS",
            ResidueType::Lysine => "LYS",
            ResidueType::AsparticAcid => "ASP",
            ResidueType::GlutamicAcid => "GLU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub residue_number: isize,              // Residue sequence number from source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "HOH")
    pub residue_type: Option<ResidueType>,  // Standard amino acid type, if recognized
    pub is_hetero: bool,                    // Whether the residue came from HETATM records
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
        chain_id: ChainId,
    ) -> Self {
        Self {
            residue_number,
            insertion_code,
            name: name.to_string(),
            residue_type: ResidueType::from_str(name).ok(),
            is_hetero,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub(crate) fn replace_atom(&mut self, atom_name: &str, old_id: AtomId, new_id: AtomId) {
        for id in self.atoms.iter_mut().filter(|id| **id == old_id) {
            *id = new_id;
        }
        self.atom_name_map.insert(atom_name.to_string(), new_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_standard_amino_acid(&self) -> bool {
        self.residue_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::{AtomId, ChainId};
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, Some('A'), "GLY", false, chain_id);
        assert_eq!(residue.residue_number, 10);
        assert_eq!(residue.insertion_code, Some('A'));
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.residue_type, Some(ResidueType::Glycine));
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_id_by_name("CA").is_none());
    }

    #[test]
    fn non_standard_residue_has_no_type() {
        let residue = Residue::new(1, None, "HOH", true, dummy_chain_id(2));
        assert!(residue.residue_type.is_none());
        assert!(!residue.is_standard_amino_acid());
    }

    #[test]
    fn add_atom_adds_atom_and_maps_name() {
        let mut residue = Residue::new(5, None, "ALA", false, dummy_chain_id(3));
        let atom_id = dummy_atom_id(42);
        residue.add_atom("CA", atom_id);
        assert_eq!(residue.atoms(), &[atom_id]);
        assert_eq!(residue.get_atom_id_by_name("CA"), Some(atom_id));
    }

    #[test]
    fn replace_atom_swaps_id_in_place() {
        let mut residue = Residue::new(7, None, "SER", false, dummy_chain_id(4));
        let n_id = dummy_atom_id(1);
        let ca_old = dummy_atom_id(2);
        let ca_new = dummy_atom_id(3);
        residue.add_atom("N", n_id);
        residue.add_atom("CA", ca_old);
        residue.replace_atom("CA", ca_old, ca_new);
        assert_eq!(residue.atoms(), &[n_id, ca_new]);
        assert_eq!(residue.get_atom_id_by_name("CA"), Some(ca_new));
    }

    #[test]
    fn residue_type_parses_case_insensitively() {
        assert_eq!(ResidueType::from_str("ala"), Ok(ResidueType::Alanine));
        assert_eq!(ResidueType::from_str(" Trp"), Ok(ResidueType::Tryptophan));
        assert!(ResidueType::from_str("MSE").is_err());
        assert!(ResidueType::from_str("").is_err());
    }

    #[test]
    fn three_letter_codes_round_trip_through_lookup() {
        for (code, residue_type) in STANDARD_RESIDUES.entries() {
            assert_eq!(residue_type.to_three_letter(), *code);
        }
    }
}
