use crate::analysis::torsion::AngleSample;
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::PI;
use thiserror::Error;

pub const DEFAULT_GRID_RESOLUTION: usize = 120;

/// Normalized density below which a cell is left transparent.
pub const DENSITY_FLOOR: f64 = 0.05;

pub const DENSITY_BANDS: usize = 10;

const ANGLE_MIN: f64 = -180.0;
const ANGLE_SPAN: f64 = 360.0;
const SINGULAR_DETERMINANT: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum DensityError {
    #[error("At least 3 samples are needed for a density estimate, got {count}")]
    TooFewSamples { count: usize },
    #[error("Sample covariance is singular")]
    SingularCovariance,
}

/// Gaussian kernel density of angle samples evaluated on a square grid over
/// `[-180, 180]²`.
///
/// The kernel covariance is the sample covariance scaled by Scott's factor
/// `n^(-1/6)` squared. Rows run along psi and columns along phi.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    resolution: usize,
    values: Vec<f64>,
    max: f64,
}

/// One non-transparent grid cell, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityCell {
    pub phi: (f64, f64),
    pub psi: (f64, f64),
    pub band: usize,
}

struct GaussianKernel {
    inverse: Matrix2<f64>,
    norm: f64,
}

impl GaussianKernel {
    fn fit(points: &[Vector2<f64>]) -> Result<Self, DensityError> {
        let n = points.len();
        if n < 3 {
            return Err(DensityError::TooFewSamples { count: n });
        }

        let mean = points.iter().sum::<Vector2<f64>>() / n as f64;
        let covariance = points
            .iter()
            .map(|p| {
                let d = p - mean;
                d * d.transpose()
            })
            .sum::<Matrix2<f64>>()
            / (n - 1) as f64;

        let factor = (n as f64).powf(-1.0 / 6.0);
        let bandwidth = covariance * (factor * factor);
        let determinant = bandwidth.determinant();
        if !determinant.is_finite() || determinant <= SINGULAR_DETERMINANT {
            return Err(DensityError::SingularCovariance);
        }
        let inverse = bandwidth
            .try_inverse()
            .ok_or(DensityError::SingularCovariance)?;

        Ok(Self {
            inverse,
            norm: 1.0 / (2.0 * PI * determinant.sqrt() * n as f64),
        })
    }

    fn evaluate(&self, points: &[Vector2<f64>], at: Vector2<f64>) -> f64 {
        points
            .iter()
            .map(|p| {
                let d = at - p;
                (-0.5 * (d.transpose() * self.inverse * d)[(0, 0)]).exp()
            })
            .sum::<f64>()
            * self.norm
    }
}

impl DensityGrid {
    /// Estimates the density of `samples`, calling `on_row` after each grid row.
    pub fn estimate(
        samples: &[AngleSample],
        resolution: usize,
        mut on_row: impl FnMut(),
    ) -> Result<Self, DensityError> {
        let points: Vec<Vector2<f64>> = samples.iter().map(|s| Vector2::new(s.phi, s.psi)).collect();
        let kernel = GaussianKernel::fit(&points)?;
        let resolution = resolution.max(1);

        let mut values = Vec::with_capacity(resolution * resolution);
        for row in 0..resolution {
            let psi = cell_center(row, resolution);
            for col in 0..resolution {
                let phi = cell_center(col, resolution);
                values.push(kernel.evaluate(&points, Vector2::new(phi, psi)));
            }
            on_row();
        }
        let max = values.iter().copied().fold(0.0, f64::max);

        Ok(Self {
            resolution,
            values,
            max,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.values.get(row * self.resolution + col).copied()
    }

    /// Density relative to the grid maximum, in `[0, 1]`.
    pub fn normalized(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.value(row, col)?;
        Some(if self.max > 0.0 { value / self.max } else { 0.0 })
    }

    /// Cells at or above the transparency floor, with their color band.
    pub fn visible_cells(&self) -> impl Iterator<Item = DensityCell> + '_ {
        let step = ANGLE_SPAN / self.resolution as f64;
        (0..self.resolution).flat_map(move |row| {
            (0..self.resolution).filter_map(move |col| {
                let band = density_band(self.normalized(row, col)?)?;
                let phi0 = ANGLE_MIN + col as f64 * step;
                let psi0 = ANGLE_MIN + row as f64 * step;
                Some(DensityCell {
                    phi: (phi0, phi0 + step),
                    psi: (psi0, psi0 + step),
                    band,
                })
            })
        })
    }
}

fn cell_center(index: usize, resolution: usize) -> f64 {
    ANGLE_MIN + (index as f64 + 0.5) * ANGLE_SPAN / resolution as f64
}

/// Maps a normalized density to one of [`DENSITY_BANDS`] bands, or `None` below the floor.
pub fn density_band(level: f64) -> Option<usize> {
    if level.is_nan() || level < DENSITY_FLOOR {
        return None;
    }
    let scaled = (level - DENSITY_FLOOR) / (1.0 - DENSITY_FLOOR) * DENSITY_BANDS as f64;
    Some((scaled as usize).min(DENSITY_BANDS - 1))
}

/// Cool-to-warm diverging color for a value in `[0, 1]`.
pub fn coolwarm(value: f64) -> (u8, u8, u8) {
    const COOL: [f64; 3] = [59.0, 76.0, 192.0];
    const MID: [f64; 3] = [221.0, 221.0, 221.0];
    const WARM: [f64; 3] = [180.0, 4.0, 38.0];

    let v = value.clamp(0.0, 1.0);
    let (from, to, t) = if v < 0.5 {
        (COOL, MID, v * 2.0)
    } else {
        (MID, WARM, (v - 0.5) * 2.0)
    };
    let lerp = |i: usize| (from[i] + (to[i] - from[i]) * t).round() as u8;
    (lerp(0), lerp(1), lerp(2))
}

/// Color of a density band, spread evenly across the diverging map.
pub fn band_color(band: usize) -> (u8, u8, u8) {
    coolwarm(band as f64 / (DENSITY_BANDS - 1) as f64)
}
