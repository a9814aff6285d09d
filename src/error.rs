use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("github api error: {status} - {message}")]
    GitHubApi { status: u16, message: String },

    #[error("http error: {0}")]
    Http(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("summary service error: {0}")]
    Service(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("preflight render failed: {0}")]
    Preflight(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for FolioError {
    fn from(err: ureq::Error) -> Self {
        FolioError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
