use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteAccessError {
    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("access denied to {path} ({status})")]
    Unauthorized { path: String, status: u16 },

    #[error("invalid response for {path}: {details}")]
    BackendResponse { path: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("deserialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting {name}: {details}")]
    InvalidSetting { name: &'static str, details: String },

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}
