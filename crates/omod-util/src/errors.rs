use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all omod operations.
#[derive(Debug, Error, Diagnostic)]
pub enum OmodError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration (e.g. omod.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your omod.toml for syntax errors"))]
    Config { message: String },

    /// Resolution finished but left modules unresolved (strict mode).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type OmodResult<T> = miette::Result<T>;
