//! Validation errors for tool input.

/// Input that failed validation at the tool boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A coordinate component did not parse as a finite real number
    #[error("invalid {field}: {value:?} is not a number")]
    InvalidCoordinate { field: &'static str, value: String },

    /// Callsign does not match the amateur callsign pattern
    #[error("invalid callsign {value:?}: {reason}")]
    InvalidCallsign { value: String, reason: &'static str },

    /// Park reference does not match `<prefix>-<digits>`
    #[error("invalid park reference {value:?}: {reason}")]
    InvalidReference { value: String, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidCoordinate {
            field: "origin latitude",
            value: "north".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid origin latitude: \"north\" is not a number"
        );

        let err = ValidationError::InvalidCallsign {
            value: "W1".into(),
            reason: "missing suffix",
        };
        assert_eq!(err.to_string(), "invalid callsign \"W1\": missing suffix");

        let err = ValidationError::InvalidReference {
            value: "US2312".into(),
            reason: "missing '-' separator",
        };
        assert_eq!(
            err.to_string(),
            "invalid park reference \"US2312\": missing '-' separator"
        );
    }
}
