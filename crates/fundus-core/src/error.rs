use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image could not be decoded: {0}")]
    ImageDecode(String),

    #[error("Image encoding error: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Heatmap composition unavailable: {0}")]
    CompositionUnavailable(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("History store error: {0}")]
    History(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for FundusError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for FundusError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FundusError>;
