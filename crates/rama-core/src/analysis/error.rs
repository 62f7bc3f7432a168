use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    #[error("No usable phi/psi angle pairs were found")]
    NoSamples,
}
