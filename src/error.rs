use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the solubility engine and its outer surfaces.
///
/// A tick never fails once its inputs are valid; every variant here is raised at a boundary
/// (parameter writes, configuration loading, elapsed-time input) before state is touched.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter (non-finite value, negative elapsed time, ...).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A control value outside its documented range.
    #[error("{name} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter name that does not match any control.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Static configuration that cannot produce a valid simulation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Propagated I/O errors (config loading).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration or parameter files.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
