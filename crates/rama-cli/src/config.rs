use crate::cli::RunOverrides;
use crate::error::{CliError, Result};
use ramachandran::output::plot::PlotConfig;
use ramachandran::workflows::config::{RamachandranConfig, RamachandranConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    #[serde(rename = "report-path")]
    report_path: Option<PathBuf>,
    #[serde(rename = "summary-path")]
    summary_path: Option<PathBuf>,
    #[serde(rename = "plot-path")]
    plot_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStructureConfig {
    #[serde(rename = "max-peptide-bond")]
    max_peptide_bond: Option<f64>,
    #[serde(rename = "standard-residues-only")]
    standard_residues_only: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPlotConfig {
    enabled: Option<bool>,
    #[serde(rename = "width-inches")]
    width_inches: Option<f64>,
    #[serde(rename = "height-inches")]
    height_inches: Option<f64>,
    dpi: Option<u32>,
}

/// Configuration as read from a TOML file, before CLI overrides are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    output: Option<PartialOutputConfig>,
    structure: Option<PartialStructureConfig>,
    plot: Option<PartialPlotConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, args: &RunOverrides) -> Result<RamachandranConfig> {
        self.apply_set_values(&args.set_values)?;

        let output = self.output.take().unwrap_or_default();
        let structure = self.structure.take().unwrap_or_default();
        let plot = self.plot.take().unwrap_or_default();

        let mut builder = RamachandranConfigBuilder::new();

        if let Some(path) = args.report_path.clone().or(output.report_path) {
            builder = builder.report_path(path);
        }
        if let Some(path) = args.summary_path.clone().or(output.summary_path) {
            builder = builder.summary_path(path);
        }
        if let Some(path) = args.plot_path.clone().or(output.plot_path) {
            builder = builder.plot_path(path);
        }

        if let Some(max_bond) = args.max_peptide_bond.or(structure.max_peptide_bond) {
            builder = builder.max_peptide_bond(max_bond);
        }
        builder = Self::merge_standard_residues_only(
            builder,
            args.include_nonstandard,
            structure.standard_residues_only,
        );

        builder = builder.plot_enabled(!args.no_plot && plot.enabled.unwrap_or(true));
        if plot.width_inches.is_some() || plot.height_inches.is_some() {
            let defaults = PlotConfig::default();
            builder = builder.plot_size(
                plot.width_inches.unwrap_or(defaults.width_inches),
                plot.height_inches.unwrap_or(defaults.height_inches),
            );
        }
        if let Some(dpi) = plot.dpi {
            builder = builder.dpi(dpi);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_standard_residues_only(
        builder: RamachandranConfigBuilder,
        cli_include_nonstandard: bool,
        file_val: Option<bool>,
    ) -> RamachandranConfigBuilder {
        if cli_include_nonstandard {
            builder.standard_residues_only(false)
        } else if let Some(val) = file_val {
            builder.standard_residues_only(val)
        } else {
            builder
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "output.report-path" => {
                    self.output.get_or_insert_with(Default::default).report_path =
                        Some(PathBuf::from(value_str));
                }
                "output.summary-path" => {
                    self.output.get_or_insert_with(Default::default).summary_path =
                        Some(PathBuf::from(value_str));
                }
                "output.plot-path" => {
                    self.output.get_or_insert_with(Default::default).plot_path =
                        Some(PathBuf::from(value_str));
                }
                "structure.max-peptide-bond" => {
                    self.structure
                        .get_or_insert_with(Default::default)
                        .max_peptide_bond = Some(parse_value(key, value_str, "float")?);
                }
                "structure.standard-residues-only" => {
                    self.structure
                        .get_or_insert_with(Default::default)
                        .standard_residues_only = Some(parse_value(key, value_str, "boolean")?);
                }
                "plot.enabled" => {
                    self.plot.get_or_insert_with(Default::default).enabled =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                "plot.width-inches" => {
                    self.plot.get_or_insert_with(Default::default).width_inches =
                        Some(parse_value(key, value_str, "float")?);
                }
                "plot.height-inches" => {
                    self.plot.get_or_insert_with(Default::default).height_inches =
                        Some(parse_value(key, value_str, "float")?);
                }
                "plot.dpi" => {
                    self.plot.get_or_insert_with(Default::default).dpi =
                        Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands, PlotArgs};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn plot_args(extra: &[&str]) -> PlotArgs {
        let mut args = vec!["rama", "plot", "-i", "in.pdb"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Plot(plot_args) => plot_args,
            _ => panic!("Expected 'plot' subcommand"),
        }
    }

    #[test]
    fn no_file_and_no_flags_gives_defaults() {
        let config = PartialConfig::load(None)
            .unwrap()
            .merge_with_cli(&plot_args(&[]).overrides)
            .unwrap();
        assert_eq!(config, RamachandranConfig::default());
    }

    #[test]
    fn file_values_are_applied() {
        let path = write_config_file(
            "config_file_values.toml",
            r#"
            [output]
            report-path = "angles.csv"

            [structure]
            max-peptide-bond = 2.2
            standard-residues-only = false

            [plot]
            width-inches = 6.0
            dpi = 100
            "#,
        );

        let config = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&plot_args(&[]).overrides)
            .unwrap();

        assert_eq!(config.output.report, PathBuf::from("angles.csv"));
        assert_eq!(config.output.summary, PathBuf::from("ramachandran_summary.csv"));
        assert_eq!(config.segmentation.max_peptide_bond, 2.2);
        assert!(!config.segmentation.standard_residues_only);
        assert_eq!(config.plot.unwrap().pixel_size(), (600, 800));
    }

    #[test]
    fn cli_args_override_file_values() {
        let path = write_config_file(
            "config_override.toml",
            r#"
            [output]
            plot-path = "from_file.svg"

            [structure]
            max-peptide-bond = 2.2 # Will be overridden

            [plot]
            enabled = true # Will be overridden
            "#,
        );
        let args = plot_args(&["--max-peptide-bond", "1.6", "--plot", "cli.svg", "--no-plot"]);

        let config = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args.overrides)
            .unwrap();

        assert_eq!(config.segmentation.max_peptide_bond, 1.6);
        assert_eq!(config.output.plot, PathBuf::from("cli.svg"));
        assert!(config.plot.is_none());
    }

    #[test]
    fn set_values_override_file_values() {
        let path = write_config_file(
            "config_set.toml",
            r#"
            [plot]
            dpi = 300 # Will be overridden by --set
            "#,
        );
        let args = plot_args(&[
            "-S",
            "plot.dpi=50",
            "-S",
            "structure.standard-residues-only=false",
            "-S",
            "output.summary-path=regions.csv",
        ]);

        let config = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args.overrides)
            .unwrap();

        assert_eq!(config.plot.unwrap().dpi, 50);
        assert!(!config.segmentation.standard_residues_only);
        assert_eq!(config.output.summary, PathBuf::from("regions.csv"));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["plot.dpi", "plot.dpi=many", "unknown.key=1"] {
            let args = plot_args(&["-S", bad]);
            let result = PartialConfig::default().merge_with_cli(&args.overrides);
            assert!(matches!(result, Err(CliError::Config(_))), "accepted '{bad}'");
        }
    }

    #[test]
    fn invalid_values_fail_validation() {
        let args = plot_args(&["--max-peptide-bond", "0"]);
        let result = PartialConfig::default().merge_with_cli(&args.overrides);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("max_peptide_bond")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let path = write_config_file(
            "config_unknown.toml",
            r#"
            [plot]
            colour = "red"
            "#,
        );
        let result = PartialConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
