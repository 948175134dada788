use thiserror::Error;

/// Configuration values that cannot be turned into encoder options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "Target resolution '{0}' is invalid: expected \"original\" or a positive pixel count"
    )]
    InvalidTargetResolution(String),

    #[error("Unknown {kind} '{name}' (expected one of: {expected})")]
    UnknownName {
        kind: &'static str,
        name: String,
        expected: &'static str,
    },
}
