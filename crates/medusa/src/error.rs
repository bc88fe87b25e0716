pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex index {index} out of bounds for a graph of {vertices} vertices")]
    VertexOutOfBounds { index: usize, vertices: usize },

    #[error("edge weight must be non-negative, got {weight}")]
    NegativeWeight { weight: f64 },

    #[error("position array holds {positions} entries but the graph has {vertices} vertices")]
    PositionLenMismatch { positions: usize, vertices: usize },

    #[error("invalid value for option `{key}`: {message}")]
    InvalidOption { key: String, message: String },

    #[error("unsupported dimension {dim}: the stress solver covers 1, 2 and 3 dimensions")]
    UnsupportedDimension { dim: usize },

    #[error("drawing space extent must be positive on every axis")]
    EmptySpace,
}
