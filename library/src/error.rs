use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Empty collection: {0}")]
    EmptyCollection(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Plugin error: {0}")]
    Plugin(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl LibraryError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        LibraryError::NotFound(msg.into())
    }

    pub fn empty_collection(msg: impl Into<String>) -> Self {
        LibraryError::EmptyCollection(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LibraryError::InvalidArgument(msg.into())
    }

    pub fn plugin(msg: impl Into<String>) -> Self {
        LibraryError::Plugin(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        LibraryError::Runtime(msg.into())
    }
}
