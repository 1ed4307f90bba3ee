#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("endpoint is required")]
    MissingEndpoint,
    #[error("endpoint is not a valid URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("endpoint scheme {0:?} is not http(s) or ws(s)")]
    UnsupportedScheme(String),
    #[error("endpoint is not a valid request URI: {0}")]
    InvalidUri(#[from] tokio_tungstenite::tungstenite::http::uri::InvalidUri),
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
