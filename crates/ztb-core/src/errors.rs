/// Core error type.
///
/// Adapter crates map their specific failures into this type so the bot core
/// can handle them consistently. Handler-facing results stay status-shaped:
/// nothing here is allowed to terminate the dispatch loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("remote service returned an empty response")]
    EmptyResponse,

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
