use thiserror::Error;

/// Main error type for geosearch operations
#[derive(Error, Debug)]
pub enum GeoSearchError {
    #[error("invalid coordinate [{0}]")]
    InvalidCoordinate(String),

    #[error("latitude must be between -90.0 to 90.0; got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be between -180.0 to 180.0; got {0}")]
    LongitudeOutOfRange(f64),

    #[error("invalid query: {0}")]
    QueryParseError(String),

    #[error("invalid query: field: {field} value: {value}")]
    UnknownField { field: String, value: String },

    #[error("PRINT must be used with id or name or region or type; got {0}")]
    UnknownSelector(String),

    #[error("max key size must be at least 1; got {0}")]
    InvalidMaxKeySize(usize),

    #[error("{0} is not a valid record")]
    InvalidRecord(String),

    #[error("value store has no entry at position {0}")]
    StoreRead(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for geosearch operations
pub type Result<T> = std::result::Result<T, GeoSearchError>;

impl GeoSearchError {
    /// Check if this error was raised while validating caller input
    /// (a coordinate, a query, a selector, a record or a setting).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeoSearchError::InvalidCoordinate(_)
                | GeoSearchError::LatitudeOutOfRange(_)
                | GeoSearchError::LongitudeOutOfRange(_)
                | GeoSearchError::QueryParseError(_)
                | GeoSearchError::UnknownField { .. }
                | GeoSearchError::UnknownSelector(_)
                | GeoSearchError::InvalidMaxKeySize(_)
                | GeoSearchError::InvalidRecord(_)
        )
    }

    /// Check if this error indicates a corrupted index rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(self, GeoSearchError::StoreRead(_))
    }
}
