use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("map has {actual} cells, expected {expected} for a {width}x{height} grid")]
    MapSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface error: {0}")]
    Surface(String),
}

// SoftBufferError holds raw window handles, which are neither Send nor Sync.
impl From<softbuffer::SoftBufferError> for Error {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        Error::Surface(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
