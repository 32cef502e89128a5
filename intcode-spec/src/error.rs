//! # Error Types for the Intcode specification crate

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    // Instruction word errors
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(i64),

    #[error("Invalid addressing mode digit {digit} in instruction word {word}")]
    InvalidModeDigit { word: i64, digit: i64 },

    #[error("Wrong operand count for {opcode}: expected {expected}, found {found}")]
    OperandCount {
        opcode: crate::Opcode,
        expected: usize,
        found: usize,
    },

    // Program text errors
    #[error("Invalid token {text:?} at offset {offset}")]
    InvalidToken { offset: usize, text: String },

    #[error("Expected ',' before number at offset {offset}")]
    ExpectedComma { offset: usize },

    #[error("Unexpected ',' at offset {offset}")]
    UnexpectedComma { offset: usize },

    #[error("Number {text} at offset {offset} does not fit in a 64-bit word")]
    NumberOutOfRange { offset: usize, text: String },
}

pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::UnknownOpcode(42);
        assert_eq!(err.to_string(), "Unknown opcode: 42");

        let err = SpecError::InvalidModeDigit { word: 301, digit: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid addressing mode digit 3 in instruction word 301"
        );
    }

    #[test]
    fn test_text_error_display() {
        let err = SpecError::InvalidToken {
            offset: 4,
            text: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid token \"x\" at offset 4");

        let err = SpecError::ExpectedComma { offset: 2 };
        assert_eq!(err.to_string(), "Expected ',' before number at offset 2");
    }
}
