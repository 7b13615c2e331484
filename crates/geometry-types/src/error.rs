use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Invalid grid: nx={nx}, dx={dx}")]
    InvalidGrid { nx: usize, dx: f64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("Profile '{name}' has length {actual}, expected {expected}")]
    ProfileLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Profile '{name}' is not strictly increasing at index {index}")]
    NonMonotonic { name: String, index: usize },

    #[error("Missing equilibrium field: {0}")]
    MissingField(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
