use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::distance;
use tracing::{debug, instrument};

/// Largest C(i)–N(i+1) distance, in Angstroms, still treated as a peptide bond.
pub const DEFAULT_MAX_PEPTIDE_BOND: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationConfig {
    pub max_peptide_bond: f64,
    pub standard_residues_only: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_peptide_bond: DEFAULT_MAX_PEPTIDE_BOND,
            standard_residues_only: true,
        }
    }
}

/// A maximal run of residues within one chain joined by unbroken peptide bonds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideSegment {
    pub chain_id: char,
    residues: Vec<ResidueId>,
}

impl PeptideSegment {
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}

/// Splits every chain of `system` into peptide segments.
///
/// A residue that is not accepted (non-standard when `standard_residues_only` is
/// set, or lacking a `CA` atom otherwise) ends the current segment. Two accepted
/// neighbors belong to the same segment only when the previous residue's `C` and
/// the next residue's `N` are closer than `max_peptide_bond`. Segments shorter than
/// two residues are dropped.
#[instrument(skip_all, name = "peptide_segmentation")]
pub fn build_segments(system: &MolecularSystem, config: &SegmentationConfig) -> Vec<PeptideSegment> {
    let mut segments = Vec::new();

    for (_, chain) in system.chains_iter() {
        let mut current: Vec<ResidueId> = Vec::new();
        let mut previous: Option<ResidueId> = None;

        for &residue_id in chain.residues() {
            if !is_accepted(system, residue_id, config) {
                flush_segment(&mut segments, &mut current, chain.id);
                previous = None;
                continue;
            }

            match previous {
                Some(prev_id)
                    if is_peptide_bonded(system, prev_id, residue_id, config.max_peptide_bond) =>
                {
                    if current.is_empty() {
                        current.push(prev_id);
                    }
                    current.push(residue_id);
                }
                _ => flush_segment(&mut segments, &mut current, chain.id),
            }
            previous = Some(residue_id);
        }

        flush_segment(&mut segments, &mut current, chain.id);
    }

    debug!(
        "Built {} peptide segment(s) covering {} residue(s).",
        segments.len(),
        segments.iter().map(|s| s.residues().len()).sum::<usize>()
    );
    segments
}

fn flush_segment(segments: &mut Vec<PeptideSegment>, current: &mut Vec<ResidueId>, chain_id: char) {
    if current.len() >= 2 {
        segments.push(PeptideSegment {
            chain_id,
            residues: std::mem::take(current),
        });
    } else {
        current.clear();
    }
}

fn is_accepted(system: &MolecularSystem, residue_id: ResidueId, config: &SegmentationConfig) -> bool {
    let Some(residue) = system.residue(residue_id) else {
        return false;
    };
    if config.standard_residues_only {
        residue.is_standard_amino_acid()
    } else {
        residue.get_atom_id_by_name("CA").is_some()
    }
}

fn is_peptide_bonded(
    system: &MolecularSystem,
    previous: ResidueId,
    next: ResidueId,
    max_bond_length: f64,
) -> bool {
    match (
        system.atom_position(previous, "C"),
        system.atom_position(next, "N"),
    ) {
        (Some(c), Some(n)) => distance(&c, &n) < max_bond_length,
        _ => false,
    }
}
