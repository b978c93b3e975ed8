use thiserror::Error;

/// Errors raised while assembling [`Config`](crate::core::config::Config) at startup.
///
/// Any of these is fatal: the process refuses to start rather than run with
/// partial credentials.
///
/// # Example
///
/// ```no_run
/// use coinbot::core::config::Config;
///
/// if let Err(err) = Config::from_env() {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is missing in environment variables!")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
