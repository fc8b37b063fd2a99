use thiserror::Error;

/// Errors surfaced by the scheduling core.
///
/// A completed request ends in exactly one of two ways: an optimal schedule
/// or one of these failures. Partial results are never returned.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request failed validation before any model was built.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// A household references an appliance id missing from the catalog.
    /// Kept separate from `InvalidInput` so callers can distinguish a
    /// malformed catalog from other shape errors.
    #[error("household {household_id} references unknown appliance {appliance_id}")]
    UnknownAppliance { household_id: u32, appliance_id: u32 },

    /// The model was built but no schedule satisfies all constraints
    /// (e.g. an emergency SoC floor unreachable within the charge limits).
    #[error("no feasible schedule satisfies the given constraints")]
    Infeasible,

    /// The solver itself failed. Fatal for the request; retry policy is
    /// the caller's concern.
    #[error("solver failure: {0}")]
    Solver(String),
}

impl From<validator::ValidationErrors> for ScheduleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ScheduleError::InvalidInput(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScheduleError::UnknownAppliance {
            household_id: 3,
            appliance_id: 42,
        };
        assert_eq!(
            err.to_string(),
            "household 3 references unknown appliance 42"
        );
    }

    #[test]
    fn test_validation_errors_convert_to_invalid_input() {
        let errors = validator::ValidationErrors::new();
        let err: ScheduleError = errors.into();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }
}
