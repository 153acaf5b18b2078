use thiserror::Error;

/// Errors that abort a conversion.
///
/// Anything recoverable (a missing strategic region, an unmapped tag) is
/// logged and skipped instead.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("No landed country has any employed workers; cannot normalize industry")]
    NoWorkforce,
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
