//! Operand addressing modes

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an operand word is turned into a value or an address
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingMode {
    /// Operand is an address; the value is `mem[operand]`
    #[default]
    Position = 0,
    /// Operand is the value itself. Never valid for a destination.
    Immediate = 1,
    /// Operand is an offset from the relative base register
    Relative = 2,
}

impl AddressingMode {
    /// All modes, indexed by their digit
    pub const ALL: [AddressingMode; 3] = [
        AddressingMode::Position,
        AddressingMode::Immediate,
        AddressingMode::Relative,
    ];

    /// Decode a single mode digit taken from `word`
    pub fn from_digit(digit: i64, word: i64) -> Result<Self> {
        match digit {
            0 => Ok(AddressingMode::Position),
            1 => Ok(AddressingMode::Immediate),
            2 => Ok(AddressingMode::Relative),
            _ => Err(SpecError::InvalidModeDigit { word, digit }),
        }
    }

    /// The decimal digit for this mode
    #[inline]
    pub const fn digit(self) -> i64 {
        self as i64
    }

    /// Whether an operand in this mode names a memory cell
    #[inline]
    pub const fn is_address(self) -> bool {
        !matches!(self, AddressingMode::Immediate)
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Position => "position",
            AddressingMode::Immediate => "immediate",
            AddressingMode::Relative => "relative",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_roundtrip() {
        for mode in AddressingMode::ALL {
            assert_eq!(AddressingMode::from_digit(mode.digit(), 0), Ok(mode));
        }
    }

    #[test]
    fn test_invalid_digit() {
        assert_eq!(
            AddressingMode::from_digit(3, 301),
            Err(SpecError::InvalidModeDigit { word: 301, digit: 3 })
        );
    }

    #[test]
    fn test_is_address() {
        assert!(AddressingMode::Position.is_address());
        assert!(!AddressingMode::Immediate.is_address());
        assert!(AddressingMode::Relative.is_address());
        assert_eq!(AddressingMode::default(), AddressingMode::Position);
    }
}
