//! Error types for Voronoi diagram construction

use thiserror::Error;

/// Errors that can occur while configuring or building a diagram
///
/// Geometric degeneracies (collinear triples, parallel lines, edges that miss
/// the clip rectangle) are not errors: the kernel models them as `Option`
/// results and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An input site cannot be used (e.g. non-finite coordinates)
    #[error("invalid site {index}: {reason}")]
    InvalidSite {
        /// Index of the offending site in the input sequence
        index: usize,
        /// Human-readable reason
        reason: String,
    },
    /// Requested cell ID does not exist
    #[error("cell not found: {0}")]
    CellNotFound(usize),
}

/// Result type alias for diagram operations
pub type Result<T> = std::result::Result<T, VoronoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VoronoiError::InvalidConfig("bad bounds".into());
        assert_eq!(err.to_string(), "invalid configuration: bad bounds");

        let err = VoronoiError::InvalidSite {
            index: 3,
            reason: "coordinate is NaN".into(),
        };
        assert_eq!(err.to_string(), "invalid site 3: coordinate is NaN");

        assert_eq!(VoronoiError::CellNotFound(7).to_string(), "cell not found: 7");
    }
}
