//! Error taxonomy shared by every pennant crate

/// Errors raised by league operations
///
/// An incomplete round is deliberately absent: advancing past an unfinished
/// round is reported as a negative outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("simulation engine failure: {0}")]
    Engine(String),

    #[error("not enough clubs: {required} required, {available} available")]
    InsufficientClubs { required: usize, available: usize },

    #[error("store failure: {0}")]
    Store(String),
}

impl LeagueError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        LeagueError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LeagueError::Validation(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        LeagueError::Engine(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LeagueError::not_found("season", 7);
        assert_eq!(err.to_string(), "season 7 not found");

        let err = LeagueError::InsufficientClubs { required: 8, available: 4 };
        assert_eq!(err.to_string(), "not enough clubs: 8 required, 4 available");

        let err = LeagueError::validation("need at least 2 clubs");
        assert_eq!(err.to_string(), "validation failed: need at least 2 clubs");
    }
}
