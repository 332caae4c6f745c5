//! Error types for the application

use thiserror::Error;

/// Result type alias using our TradeError
pub type Result<T> = std::result::Result<T, TradeError>;

/// Main error type for catalog and trade calculation operations
#[derive(Error, Debug)]
pub enum TradeError {
    /// A request referenced a player name that is not in the catalog
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    /// An outgoing player is past lockout while the restriction is active
    #[error("Player {0} is locked out and cannot be traded out")]
    OutgoingPlayerLocked(String),

    /// Positional swap requested without any positions
    #[error("Positional swap requires at least one position")]
    InvalidPositionSet,

    /// Unrecognized strategy code
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Malformed request field (missing player, bad datetime, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Search exceeded its deadline or was cancelled
    #[error("Trade search timed out after evaluating {evaluated} combinations")]
    SearchTimedOut { evaluated: u64 },

    /// Candidate pool exceeds the configured pair enumeration bound
    #[error("Candidate pool of {size} players exceeds the limit of {limit}; narrow the positions")]
    CandidatePoolTooLarge { size: usize, limit: usize },

    /// Team-list restriction requested but no team list is loaded
    #[error("Team list is not available")]
    TeamListUnavailable,

    /// Catalog data could not be loaded or is malformed
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TradeError {
    /// Returns true if the caller can fix the error by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TradeError::PlayerNotFound(_)
                | TradeError::OutgoingPlayerLocked(_)
                | TradeError::InvalidPositionSet
                | TradeError::InvalidStrategy(_)
                | TradeError::InvalidRequest(_)
                | TradeError::CandidatePoolTooLarge { .. }
        )
    }
}
