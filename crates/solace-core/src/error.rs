use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed field path: {0}")]
    MalformedPath(String),
}
