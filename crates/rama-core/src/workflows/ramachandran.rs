use super::config::RamachandranConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::analysis::error::AnalysisError;
use crate::analysis::segments::{SegmentationConfig, build_segments};
use crate::analysis::summary::{ClassifiedSample, RegionSummary, classify_samples};
use crate::analysis::torsion::{AngleSample, extract_angle_samples};
use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::StructureFile;
use crate::output::density::DensityGrid;
use crate::output::{plot, report};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Backbone angles extracted from one structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAngles {
    pub metadata: PdbMetadata,
    pub segment_count: usize,
    pub samples: Vec<AngleSample>,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RamachandranReport {
    pub metadata: PdbMetadata,
    pub segment_count: usize,
    pub classified: Vec<ClassifiedSample>,
    pub summary: RegionSummary,
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
    /// `None` when plotting was disabled.
    pub plot_path: Option<PathBuf>,
    /// Whether the density layer could be estimated and drawn.
    pub density_rendered: bool,
}

/// Parses `path` and returns every defined (phi, psi) pair in file order.
///
/// An empty sample list is not an error here; callers decide what to do with it.
#[instrument(skip_all, name = "torsion_extraction", fields(path = %path.display()))]
pub fn analyze(path: &Path, config: &SegmentationConfig) -> Result<StructureAngles, WorkflowError> {
    let (system, metadata) = PdbFile::read_from_path(path).map_err(|e| WorkflowError::Parse {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let segments = build_segments(&system, config);
    let samples = extract_angle_samples(&system, &segments);
    info!(
        "Extracted {} angle pair(s) from {} peptide segment(s).",
        samples.len(),
        segments.len()
    );

    Ok(StructureAngles {
        metadata,
        segment_count: segments.len(),
        samples,
    })
}

/// Runs the full pipeline on one structure file.
///
/// Both CSV tables are always written; the plot only when `config.plot` is set.
/// A structure without any usable angle pair fails with
/// [`WorkflowError::NoSamples`] before anything is written.
#[instrument(skip_all, name = "ramachandran_workflow", fields(path = %path.display()))]
pub fn run(
    path: &Path,
    config: &RamachandranConfig,
    reporter: &ProgressReporter,
) -> Result<RamachandranReport, WorkflowError> {
    // === Phase 1: Parse structure and extract torsions ===
    let angles = reporter.phase("Extracting torsions", || analyze(path, &config.segmentation))?;

    // === Phase 2: Classify and summarize ===
    let (classified, summary) = reporter.phase("Classifying", || {
        let classified = classify_samples(&angles.samples);
        RegionSummary::from_classified(&classified).map(|summary| (classified, summary))
    })
    .map_err(|e| match e {
        AnalysisError::NoSamples => WorkflowError::NoSamples {
            path: path.to_string_lossy().to_string(),
        },
    })?;
    for share in summary.entries() {
        info!(
            "{}: {} of {} ({})",
            share.region,
            share.count,
            summary.total(),
            share.formatted_percentage()
        );
    }

    // === Phase 3: Persist tables ===
    reporter.phase("Writing reports", || -> Result<(), WorkflowError> {
        report::write_samples_to_path(&config.output.report, &classified)?;
        report::write_summary_to_path(&config.output.summary, &summary)?;
        Ok(())
    })?;
    info!(
        "Reports written to '{}' and '{}'.",
        config.output.report.display(),
        config.output.summary.display()
    );

    // === Phase 4: Plot ===
    let mut density_rendered = false;
    let plot_path = match &config.plot {
        Some(plot_config) => {
            reporter.phase("Rendering plot", || -> Result<(), WorkflowError> {
                let density = estimate_density(&angles.samples, config.density_resolution, reporter);
                density_rendered = density.is_some();
                plot::render_plot(
                    &config.output.plot,
                    &classified,
                    density.as_ref(),
                    plot_config,
                )?;
                Ok(())
            })?;
            info!("Plot written to '{}'.", config.output.plot.display());
            Some(config.output.plot.clone())
        }
        None => None,
    };

    Ok(RamachandranReport {
        metadata: angles.metadata,
        segment_count: angles.segment_count,
        classified,
        summary,
        report_path: config.output.report.clone(),
        summary_path: config.output.summary.clone(),
        plot_path,
        density_rendered,
    })
}

fn estimate_density(
    samples: &[AngleSample],
    resolution: usize,
    reporter: &ProgressReporter,
) -> Option<DensityGrid> {
    reporter.report(Progress::TaskStart {
        total_steps: resolution as u64,
    });
    let result = DensityGrid::estimate(samples, resolution, || {
        reporter.report(Progress::TaskIncrement)
    });
    reporter.report(Progress::TaskFinish);

    match result {
        Ok(grid) => Some(grid),
        Err(e) => {
            warn!("Skipping density layer: {}", e);
            reporter.report(Progress::Message(format!("Density layer skipped: {e}")));
            None
        }
    }
}
