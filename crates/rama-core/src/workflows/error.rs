use crate::core::io::pdb::PdbError;
use crate::output::plot::PlotError;
use crate::output::report::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to read structure '{path}': {source}")]
    Parse { path: String, source: PdbError },

    #[error("No usable phi/psi angle pairs were found in '{path}'")]
    NoSamples { path: String },

    #[error("Report writing failed: {source}")]
    Report {
        #[from]
        source: ReportError,
    },

    #[error("Plot rendering failed: {source}")]
    Plot {
        #[from]
        source: PlotError,
    },
}
