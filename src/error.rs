//! Typed error kinds for the engine.
//!
//! Only I/O and parse errors are fatal to the whole run ([`EngineError`]);
//! everything else is a per-component outcome that the caller is expected to
//! handle and log (see [`crate::bdr::BdrOutcome`], [`BdrDomainError`]).

/// Errors that abort the entire run: a required input file is missing, or a
/// row in one of the input tables could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("required input file not found: {path}")]
    ConfigMissing { path: String },

    #[error("malformed input in {file} ({row}): {detail}")]
    ConfigMalformed {
        file: String,
        row: String,
        detail: String,
    },

    #[error("I/O error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Raised when a Half-Half transformation is attempted with `alpha >= 1`.
///
/// Per the design, the offending component is excluded from simulation and
/// the run continues; this is never propagated as a fatal [`EngineError`].
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("alpha = {alpha} is outside the domain of the Half-Half transform (requires alpha < 1)")]
pub struct BdrDomainError {
    pub alpha: f64,
}
