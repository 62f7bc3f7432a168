use crate::analysis::segments::{DEFAULT_MAX_PEPTIDE_BOND, SegmentationConfig};
use crate::output::density::DEFAULT_GRID_RESOLUTION;
use crate::output::plot::PlotConfig;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_REPORT_PATH: &str = "ramachandran_report.csv";
pub const DEFAULT_SUMMARY_PATH: &str = "ramachandran_summary.csv";
pub const DEFAULT_PLOT_PATH: &str = "ramachandran_plot.svg";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub report: PathBuf,
    pub summary: PathBuf,
    pub plot: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            report: PathBuf::from(DEFAULT_REPORT_PATH),
            summary: PathBuf::from(DEFAULT_SUMMARY_PATH),
            plot: PathBuf::from(DEFAULT_PLOT_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RamachandranConfig {
    pub output: OutputPaths,
    pub segmentation: SegmentationConfig,
    /// `None` disables plot rendering.
    pub plot: Option<PlotConfig>,
    pub density_resolution: usize,
}

impl Default for RamachandranConfig {
    fn default() -> Self {
        Self {
            output: OutputPaths::default(),
            segmentation: SegmentationConfig::default(),
            plot: Some(PlotConfig::default()),
            density_resolution: DEFAULT_GRID_RESOLUTION,
        }
    }
}

#[derive(Default)]
pub struct RamachandranConfigBuilder {
    report_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
    plot_path: Option<PathBuf>,
    max_peptide_bond: Option<f64>,
    standard_residues_only: Option<bool>,
    plot_enabled: Option<bool>,
    width_inches: Option<f64>,
    height_inches: Option<f64>,
    dpi: Option<u32>,
    density_resolution: Option<usize>,
}

impl RamachandranConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_path(mut self, path: PathBuf) -> Self {
        self.report_path = Some(path);
        self
    }
    pub fn summary_path(mut self, path: PathBuf) -> Self {
        self.summary_path = Some(path);
        self
    }
    pub fn plot_path(mut self, path: PathBuf) -> Self {
        self.plot_path = Some(path);
        self
    }
    pub fn max_peptide_bond(mut self, angstroms: f64) -> Self {
        self.max_peptide_bond = Some(angstroms);
        self
    }
    pub fn standard_residues_only(mut self, only: bool) -> Self {
        self.standard_residues_only = Some(only);
        self
    }
    pub fn plot_enabled(mut self, enabled: bool) -> Self {
        self.plot_enabled = Some(enabled);
        self
    }
    pub fn plot_size(mut self, width_inches: f64, height_inches: f64) -> Self {
        self.width_inches = Some(width_inches);
        self.height_inches = Some(height_inches);
        self
    }
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }
    pub fn density_resolution(mut self, cells: usize) -> Self {
        self.density_resolution = Some(cells);
        self
    }

    /// Fills unset values with defaults and validates the result.
    pub fn build(self) -> Result<RamachandranConfig, ConfigError> {
        let defaults = RamachandranConfig::default();
        let default_plot = PlotConfig::default();

        let max_peptide_bond = positive(
            "max_peptide_bond",
            self.max_peptide_bond.unwrap_or(DEFAULT_MAX_PEPTIDE_BOND),
        )?;
        let width_inches = positive(
            "width_inches",
            self.width_inches.unwrap_or(default_plot.width_inches),
        )?;
        let height_inches = positive(
            "height_inches",
            self.height_inches.unwrap_or(default_plot.height_inches),
        )?;

        let dpi = self.dpi.unwrap_or(default_plot.dpi);
        if dpi == 0 {
            return Err(invalid("dpi", "must be greater than zero"));
        }
        let density_resolution = self.density_resolution.unwrap_or(defaults.density_resolution);
        if density_resolution == 0 {
            return Err(invalid("density_resolution", "must be greater than zero"));
        }

        let output = OutputPaths {
            report: self.report_path.unwrap_or(defaults.output.report),
            summary: self.summary_path.unwrap_or(defaults.output.summary),
            plot: self.plot_path.unwrap_or(defaults.output.plot),
        };
        for (name, path) in [
            ("report_path", &output.report),
            ("summary_path", &output.summary),
            ("plot_path", &output.plot),
        ] {
            if path.as_os_str().is_empty() {
                return Err(invalid(name, "path must not be empty"));
            }
        }

        Ok(RamachandranConfig {
            output,
            segmentation: SegmentationConfig {
                max_peptide_bond,
                standard_residues_only: self
                    .standard_residues_only
                    .unwrap_or(defaults.segmentation.standard_residues_only),
            },
            plot: self.plot_enabled.unwrap_or(true).then_some(PlotConfig {
                width_inches,
                height_inches,
                dpi,
            }),
            density_resolution,
        })
    }
}

fn invalid(name: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_produces_defaults() {
        let config = RamachandranConfigBuilder::new().build().unwrap();
        assert_eq!(config, RamachandranConfig::default());
        assert_eq!(config.output.report, PathBuf::from("ramachandran_report.csv"));
        assert_eq!(config.segmentation.max_peptide_bond, 1.8);
        assert_eq!(config.plot.unwrap().pixel_size(), (3000, 2400));
    }

    #[test]
    fn builder_applies_overrides() {
        let config = RamachandranConfigBuilder::new()
            .report_path(PathBuf::from("out/report.csv"))
            .max_peptide_bond(2.0)
            .standard_residues_only(false)
            .plot_size(5.0, 4.0)
            .dpi(100)
            .build()
            .unwrap();

        assert_eq!(config.output.report, PathBuf::from("out/report.csv"));
        assert_eq!(config.output.summary, PathBuf::from(DEFAULT_SUMMARY_PATH));
        assert_eq!(config.segmentation.max_peptide_bond, 2.0);
        assert!(!config.segmentation.standard_residues_only);
        assert_eq!(config.plot.unwrap().pixel_size(), (500, 400));
    }

    #[test]
    fn disabling_plot_clears_plot_config() {
        let config = RamachandranConfigBuilder::new().plot_enabled(false).build().unwrap();
        assert!(config.plot.is_none());
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let err = RamachandranConfigBuilder::new().max_peptide_bond(0.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "max_peptide_bond", .. }));

        let err = RamachandranConfigBuilder::new().plot_size(f64::NAN, 4.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "width_inches", .. }));

        let err = RamachandranConfigBuilder::new().dpi(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "dpi", .. }));
    }

    #[test]
    fn empty_output_path_is_rejected() {
        let err = RamachandranConfigBuilder::new()
            .summary_path(PathBuf::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "summary_path", .. }));
    }
}
