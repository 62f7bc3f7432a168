use crate::cli::ClassifyArgs;
use crate::error::{CliError, Result};
use ramachandran::analysis::region::{Region, classify};
use std::io::Write;
use tracing::{info, warn};

pub fn run(args: ClassifyArgs) -> Result<()> {
    let region = classify_pair(args.phi, args.psi)?;
    let stdout = std::io::stdout();
    writeln!(stdout.lock(), "{}", region)?;
    Ok(())
}

fn classify_pair(phi: f64, psi: f64) -> Result<Region> {
    if phi.is_nan() || psi.is_nan() {
        return Err(CliError::Argument("angles must be numbers, got NaN".to_string()));
    }
    let region = classify(phi, psi);
    if region == Region::Disallowed {
        warn!("({}, {}) lies outside the [-180, 180] angle domain.", phi, psi);
    }
    info!("({}, {}) classified as {}.", phi, psi, region);
    Ok(region)
}
