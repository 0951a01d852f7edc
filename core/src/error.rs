#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty drag payload")]
    EmptyPayload,
    #[error("vertex count must be {min}..={max}, got {found}")]
    VertexCount { min: u8, max: u8, found: usize },
    #[error("expected {expected} points, got {found}")]
    PointCount { expected: usize, found: usize },
    #[error("malformed point '{0}'")]
    MalformedPoint(String),
    #[error("malformed css length '{0}'")]
    MalformedLength(String),
    #[error("storage: {0}")]
    Storage(String),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
