//! Crate error type.

/// Errors from the terminal runtime and the binary's setup.
///
/// Component operations are infallible; these only come from terminal I/O,
/// logging setup and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// Terminal size override with a zero dimension
    #[error("Invalid terminal size: {width}x{height}")]
    InvalidSize { width: u16, height: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
