/// Errors raised while building a puzzle. Gameplay itself never fails:
/// illegal moves and empty-history undos are reported as no-ops instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error(
        "invalid parameters: {tube_count} tubes, capacity {capacity}, {color_count} colors \
         (need at least 2 tubes, capacity >= 1 and 1 <= colors < tubes)"
    )]
    InvalidParameters {
        tube_count: usize,
        capacity: usize,
        color_count: usize,
    },

    #[error("tube {index} has capacity {found}, expected {expected}")]
    CapacityMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("color {color} appears {found} times, expected {expected}")]
    ColorCountMismatch {
        color: usize,
        expected: usize,
        found: usize,
    },

    #[error("color {color} is outside 1..={color_count}")]
    UnknownColor { color: usize, color_count: usize },

    #[error("cannot parse tube {input:?}: {reason}")]
    ParseTube { input: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_display() {
        let err = PuzzleError::InvalidParameters {
            tube_count: 1,
            capacity: 4,
            color_count: 1,
        };
        assert!(err.to_string().starts_with("invalid parameters: 1 tubes, capacity 4, 1 colors"));
    }

    #[test]
    fn test_color_count_mismatch_display() {
        let err = PuzzleError::ColorCountMismatch {
            color: 2,
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "color 2 appears 3 times, expected 4");
    }

    #[test]
    fn test_parse_tube_display() {
        let err = PuzzleError::ParseTube {
            input: "A.A".to_string(),
            reason: "drop above an empty slot".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse tube \"A.A\": drop above an empty slot"
        );
    }
}
