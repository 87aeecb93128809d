use thiserror::Error;

/// Failure conditions signalled by the scheduling and scoring engine.
///
/// All of them are deterministic consequences of the input; none is worth
/// retrying without changing that input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("At least {required} teams are required, found {found}")]
    InsufficientTeams { required: usize, found: usize },

    #[error("Unknown sport: {0}")]
    UnknownSportConfig(String),

    #[error("Malformed scoreboard: {0}")]
    MalformedScoreboard(String),

    #[error("Rating {field} out of range: {value}")]
    InvalidRating { field: &'static str, value: u8 },

    #[error("Could not draw a unique access code for round {round}")]
    AccessCodesExhausted { round: u32 },

    #[error("Match not found: {0}")]
    UnknownMatch(i64),

    #[error("Team {team} holds more than one role in the same match")]
    RoleConflict { team: i64 },

    #[error("Access code {code} is used twice in round {round}")]
    DuplicateAccessCode { round: u32, code: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Add context to snapshot file errors
pub fn snapshot_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} snapshot: {}", operation, path.display())
}

/// Add context to database errors
pub fn database_context(operation: &str) -> String {
    format!("Failed to {} in database", operation)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}
