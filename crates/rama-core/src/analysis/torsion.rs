use super::segments::PeptideSegment;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::dihedral_angle_degrees;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A (phi, psi) backbone angle pair, in degrees within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub phi: f64,
    pub psi: f64,
}

impl AngleSample {
    pub fn new(phi: f64, psi: f64) -> Self {
        Self { phi, psi }
    }
}

/// Backbone torsions of one residue; `None` where the angle is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackboneTorsions {
    pub phi: Option<f64>,
    pub psi: Option<f64>,
}

impl BackboneTorsions {
    pub fn sample(&self) -> Option<AngleSample> {
        Some(AngleSample::new(self.phi?, self.psi?))
    }
}

/// Computes phi and psi for every residue of a segment, in segment order.
///
/// The first residue has no phi and the last has no psi. A residue missing
/// `N`, `CA` or `C` gets neither, and a missing neighbor atom leaves only the
/// angle that needs it undefined.
pub fn segment_torsions(system: &MolecularSystem, segment: &PeptideSegment) -> Vec<BackboneTorsions> {
    let residues = segment.residues();
    residues
        .iter()
        .enumerate()
        .map(|(i, &residue_id)| {
            let previous = i.checked_sub(1).map(|j| residues[j]);
            let next = residues.get(i + 1).copied();
            residue_torsions(system, previous, residue_id, next)
        })
        .collect()
}

fn residue_torsions(
    system: &MolecularSystem,
    previous: Option<ResidueId>,
    residue_id: ResidueId,
    next: Option<ResidueId>,
) -> BackboneTorsions {
    let mut torsions = BackboneTorsions::default();

    let (Some(n), Some(ca), Some(c)) = (
        system.atom_position(residue_id, "N"),
        system.atom_position(residue_id, "CA"),
        system.atom_position(residue_id, "C"),
    ) else {
        return torsions;
    };

    if let Some(c_prev) = previous.and_then(|id| system.atom_position(id, "C")) {
        torsions.phi = dihedral_angle_degrees(&c_prev, &n, &ca, &c);
        if torsions.phi.is_none() {
            warn!("Degenerate phi geometry at {}; the residue is skipped.", describe(system, residue_id));
        }
    }
    if let Some(n_next) = next.and_then(|id| system.atom_position(id, "N")) {
        torsions.psi = dihedral_angle_degrees(&n, &ca, &c, &n_next);
        if torsions.psi.is_none() {
            warn!("Degenerate psi geometry at {}; the residue is skipped.", describe(system, residue_id));
        }
    }

    torsions
}

fn describe(system: &MolecularSystem, residue_id: ResidueId) -> String {
    match system.residue(residue_id) {
        Some(residue) => format!(
            "{} {}{}",
            residue.name,
            residue.residue_number,
            residue.insertion_code.map(String::from).unwrap_or_default()
        ),
        None => "an unknown residue".to_string(),
    }
}

/// Flattens the defined (phi, psi) pairs of all segments, in segment order.
pub fn extract_angle_samples(system: &MolecularSystem, segments: &[PeptideSegment]) -> Vec<AngleSample> {
    let samples: Vec<AngleSample> = segments
        .iter()
        .flat_map(|segment| segment_torsions(system, segment))
        .filter_map(|torsions| torsions.sample())
        .collect();

    debug!(
        "Extracted {} angle sample(s) from {} segment(s).",
        samples.len(),
        segments.len()
    );
    samples
}
