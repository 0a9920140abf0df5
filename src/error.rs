use thiserror::Error;

/// Input field of a schedule request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    TotalBudget,
    StartPrice,
    FloorPrice,
    SpacingValue,
    Tolerance,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::TotalBudget => write!(f, "total_budget"),
            InputField::StartPrice => write!(f, "start_price"),
            InputField::FloorPrice => write!(f, "floor_price"),
            InputField::SpacingValue => write!(f, "spacing_value"),
            InputField::Tolerance => write!(f, "tolerance"),
        }
    }
}

/// Main error type for schedule planning
#[derive(Error, Debug)]
pub enum LadderError {
    // Validation errors
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: InputField, reason: String },

    // Planning errors
    #[error("No feasible allocation: {0}")]
    NoFeasibleAllocation(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LadderError {
    pub fn invalid(field: InputField, reason: impl Into<String>) -> Self {
        LadderError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field that failed validation, if this is an input error
    pub fn field(&self) -> Option<InputField> {
        match self {
            LadderError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type alias for LadderError
pub type Result<T> = std::result::Result<T, LadderError>;
