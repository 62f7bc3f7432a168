#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const N_CA: f64 = 1.458;
const CA_C: f64 = 1.525;
const C_N: f64 = 1.329;
const N_CA_C: f64 = 111.2;
const CA_C_N: f64 = 116.2;
const C_N_CA: f64 = 121.7;
const OMEGA: f64 = 180.0;

/// Backbone atoms of one residue, in `N`, `CA`, `C` order.
pub type Backbone = [Point3<f64>; 3];

/// Places `d` so that |cd| = `length`, angle bcd = `angle` and dihedral abcd = `torsion`.
fn place(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, length: f64, angle: f64, torsion: f64) -> Point3<f64> {
    let bc: Vector3<f64> = (c - b).normalize();
    let n = (b - a).cross(&bc).normalize();
    let m = n.cross(&bc);
    let (angle, torsion) = (angle.to_radians(), torsion.to_radians());
    c + bc * (-length * angle.cos())
        + m * (length * angle.sin() * torsion.cos())
        + n * (length * angle.sin() * torsion.sin())
}

/// Builds an ideal-geometry backbone with the given per-residue (phi, psi).
///
/// The phi of the first residue and the psi of the last are ignored.
pub fn ideal_backbone(angles: &[(f64, f64)]) -> Vec<Backbone> {
    let n0 = Point3::origin();
    let ca0 = Point3::new(N_CA, 0.0, 0.0);
    let theta = (180.0 - N_CA_C).to_radians();
    let c0 = ca0 + Vector3::new(theta.cos(), theta.sin(), 0.0) * CA_C;

    let mut residues = Vec::with_capacity(angles.len());
    if angles.is_empty() {
        return residues;
    }
    residues.push([n0, ca0, c0]);
    for i in 1..angles.len() {
        let [n, ca, c] = residues[i - 1];
        let n_next = place(&n, &ca, &c, C_N, CA_C_N, angles[i - 1].1);
        let ca_next = place(&ca, &c, &n_next, N_CA, C_N_CA, OMEGA);
        let c_next = place(&c, &n_next, &ca_next, CA_C, N_CA_C, angles[i].0);
        residues.push([n_next, ca_next, c_next]);
    }
    residues
}

pub fn translate(backbone: &mut [Backbone], offset: Vector3<f64>) {
    for atom in backbone.iter_mut().flatten() {
        *atom += offset;
    }
}

/// Incrementally writes fixed-column PDB records.
#[derive(Default)]
pub struct PdbWriter {
    contents: String,
    serial: usize,
}

impl PdbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, id_code: &str) -> Self {
        let _ = writeln!(
            self.contents,
            "HEADER    TEST STRUCTURE                          01-JAN-00   {id_code}"
        );
        self
    }

    pub fn atom(mut self, record: &str, name: &str, res_name: &str, chain: char, res_seq: isize, pos: &Point3<f64>) -> Self {
        self.serial += 1;
        let _ = writeln!(
            self.contents,
            "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}",
            record,
            self.serial,
            format!(" {name}"),
            res_name,
            chain,
            res_seq,
            pos.x,
            pos.y,
            pos.z,
            1.0,
            0.0
        );
        self
    }

    /// Appends a chain of backbone-only residues numbered from 1.
    pub fn chain(mut self, chain: char, res_name: &str, backbone: &[Backbone]) -> Self {
        for (i, atoms) in backbone.iter().enumerate() {
            for (name, pos) in ["N", "CA", "C"].iter().zip(atoms) {
                self = self.atom("ATOM", name, res_name, chain, i as isize + 1, pos);
            }
        }
        let _ = writeln!(self.contents, "TER");
        self
    }

    pub fn finish(mut self) -> String {
        self.contents.push_str("END\n");
        self.contents
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub const HELIX: (f64, f64) = (-57.0, -47.0);
pub const SHEET: (f64, f64) = (-119.0, 113.0);
pub const LEFT_HANDED: (f64, f64) = (57.0, 47.0);
pub const EXTENDED_POSITIVE: (f64, f64) = (160.0, 170.0);
