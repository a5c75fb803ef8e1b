//! Errors from loading audit configuration.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A provider failed, or the merged values do not fit the config types.
    #[error("cannot load audit configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Values that load but contradict each other, such as a default page
    /// size above the maximum.
    #[error("invalid audit configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
