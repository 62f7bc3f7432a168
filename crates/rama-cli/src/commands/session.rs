use crate::cli::SessionArgs;
use crate::commands::plot::{execute, print_report};
use crate::config::PartialConfig;
use crate::error::Result;
use ramachandran::workflows::config::RamachandranConfig;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{error, info};

const PROMPT: &str = "PDB file (blank line to finish)> ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub fn run(args: SessionArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let config = partial_config.merge_with_cli(&args.overrides)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = run_session(&config, stdin.lock(), &mut stdout.lock(), quiet)?;

    info!(
        "Session ended: {} succeeded, {} failed.",
        summary.succeeded, summary.failed
    );
    Ok(())
}

/// Reads one structure path per line and runs the pipeline for each.
///
/// A blank line or end of input ends the session. A failed run is reported and
/// the session moves on to the next path; later runs overwrite the outputs of
/// earlier ones.
pub fn run_session<R: BufRead, W: Write>(
    config: &RamachandranConfig,
    mut reader: R,
    out: &mut W,
    quiet: bool,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut line = String::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let entry = line.trim();
        if entry.is_empty() {
            break;
        }

        let input = Path::new(entry);
        match execute(input, config, quiet) {
            Ok(report) => {
                print_report(&report, input, out)?;
                summary.succeeded += 1;
            }
            Err(e) => {
                error!("Run on {:?} failed: {}", input, e);
                writeln!(out, "✗ {}: {}", input.display(), e)?;
                summary.failed += 1;
            }
        }
    }

    writeln!(
        out,
        "Session finished: {} succeeded, {} failed.",
        summary.succeeded, summary.failed
    )?;
    Ok(summary)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ramachandran::workflows::config::RamachandranConfigBuilder;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Five-residue ideal backbone; its three interior residues classify as
    /// Favorable, Most Favorable and Favorable.
    const TEST_STRUCTURE: &str = "\
HEADER    TEST PEPTIDE                            18-OCT-26   TEST
TITLE     IDEAL BACKBONE PENTAPEPTIDE
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00
ATOM      3  C   ALA A   1       2.009   1.422   0.000  1.00  0.00
ATOM      4  N   GLY A   2       1.463   2.263  -0.872  1.00  0.00
ATOM      5  CA  GLY A   2       1.899   3.650  -0.974  1.00  0.00
ATOM      6  C   GLY A   2       1.768   4.370   0.364  1.00  0.00
ATOM      7  N   SER A   3       0.618   4.205   1.008  1.00  0.00
ATOM      8  CA  SER A   3       0.364   4.838   2.297  1.00  0.00
ATOM      9  C   SER A   3       0.108   3.797   3.382  1.00  0.00
ATOM     10  N   LEU A   4       1.027   3.708   4.338  1.00  0.00
ATOM     11  CA  LEU A   4       0.903   2.754   5.433  1.00  0.00
ATOM     12  C   LEU A   4       0.153   3.363   6.613  1.00  0.00
ATOM     13  N   VAL A   5      -0.254   4.619   6.464  1.00  0.00
ATOM     14  CA  VAL A   5      -0.981   5.319   7.516  1.00  0.00
ATOM     15  C   VAL A   5      -2.340   4.675   7.770  1.00  0.00
TER
END
";

    pub(crate) fn write_test_structure(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, TEST_STRUCTURE).unwrap();
        path
    }

    fn csv_only_config(dir: &Path) -> RamachandranConfig {
        RamachandranConfigBuilder::new()
            .report_path(dir.join("angles.csv"))
            .summary_path(dir.join("regions.csv"))
            .plot_enabled(false)
            .build()
            .unwrap()
    }

    #[test]
    fn session_continues_after_a_failed_run() {
        let dir = tempdir().unwrap();
        let good = write_test_structure(dir.path(), "good.pdb");
        let missing = dir.path().join("missing.pdb");
        let input = format!("{}\n{}\n{}\n", missing.display(), good.display(), good.display());

        let mut out = Vec::new();
        let summary =
            run_session(&csv_only_config(dir.path()), Cursor::new(input), &mut out, true).unwrap();

        assert_eq!(summary, SessionSummary { succeeded: 2, failed: 1 });
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("✗"));
        assert!(text.contains("Session finished: 2 succeeded, 1 failed."));
        assert!(dir.path().join("regions.csv").exists());
    }

    #[test]
    fn blank_line_ends_session_before_later_entries() {
        let dir = tempdir().unwrap();
        let good = write_test_structure(dir.path(), "good.pdb");
        let input = format!("\n{}\n", good.display());

        let mut out = Vec::new();
        let summary =
            run_session(&csv_only_config(dir.path()), Cursor::new(input), &mut out, true).unwrap();

        assert_eq!(summary, SessionSummary::default());
        assert!(!dir.path().join("angles.csv").exists());
    }

    #[test]
    fn end_of_input_ends_session() {
        let dir = tempdir().unwrap();
        let good = write_test_structure(dir.path(), "good.pdb");

        let mut out = Vec::new();
        let summary = run_session(
            &csv_only_config(dir.path()),
            Cursor::new(format!("  {}  ", good.display())),
            &mut out,
            true,
        )
        .unwrap();

        assert_eq!(summary.succeeded, 1);
        let regions = std::fs::read_to_string(dir.path().join("regions.csv")).unwrap();
        assert_eq!(
            regions,
            "Region,Percentage\nFavorable,66.67%\nMost Favorable,33.33%\n"
        );
    }
}
