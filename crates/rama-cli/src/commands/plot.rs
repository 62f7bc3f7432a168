use crate::cli::PlotArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ramachandran::core::io::pdb::PdbMetadata;
use ramachandran::workflows::config::RamachandranConfig;
use ramachandran::workflows::progress::ProgressReporter;
use ramachandran::workflows::ramachandran::{self as workflow, RamachandranReport};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

const PDB_EXTENSIONS: [&str; 2] = ["pdb", "ent"];

pub fn run(args: PlotArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.overrides)?;

    let report = execute(&args.input, &config, quiet)?;

    let stdout = std::io::stdout();
    print_report(&report, &args.input, &mut stdout.lock())?;
    Ok(())
}

/// Runs the pipeline for one input with a progress display attached.
pub fn execute(input: &Path, config: &RamachandranConfig, quiet: bool) -> Result<RamachandranReport> {
    check_extension(input);

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the Ramachandran workflow on {:?}", input);
    let report = workflow::run(input, config, &reporter)?;
    info!(
        "Workflow finished with {} classified angle pair(s).",
        report.classified.len()
    );
    Ok(report)
}

/// Writes the user-facing summary of a finished run.
pub fn print_report(report: &RamachandranReport, input: &Path, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "✓ {}: {} angle pair(s) from {} peptide segment(s)",
        input.display(),
        report.summary.total(),
        report.segment_count
    )?;
    if let Some(label) = structure_label(&report.metadata) {
        writeln!(out, "  Structure: {}", label)?;
    }
    for share in report.summary.entries() {
        writeln!(
            out,
            "  {:<16}{:>8}  ({})",
            share.region.label(),
            share.formatted_percentage(),
            share.count
        )?;
    }
    writeln!(out, "  Angle table:   {}", report.report_path.display())?;
    writeln!(out, "  Region table:  {}", report.summary_path.display())?;
    if let Some(plot_path) = &report.plot_path {
        writeln!(out, "  Plot:          {}", plot_path.display())?;
        if !report.density_rendered {
            writeln!(out, "  (density layer skipped: too few or degenerate samples)")?;
        }
    }
    Ok(())
}

fn structure_label(metadata: &PdbMetadata) -> Option<String> {
    match (&metadata.id_code, &metadata.title) {
        (Some(id), Some(title)) => Some(format!("{id} ({title})")),
        (Some(id), None) => Some(id.clone()),
        (None, Some(title)) => Some(title.clone()),
        (None, None) => None,
    }
}

fn check_extension(input: &Path) {
    let recognized = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PDB_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)));
    if !recognized {
        warn!(
            "Input {:?} does not have a .pdb or .ent extension; reading it as PDB anyway.",
            input
        );
    }
}
