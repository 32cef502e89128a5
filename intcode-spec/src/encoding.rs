//! # Instruction Word Encoding
//!
//! ```text
//! word = opcode + Σ mode[i] · 10^(2 + i)
//! ```
//!
//! Operand 0 takes the hundreds digit, operand 1 the thousands digit, and so
//! on. Digits that are absent decode as [`AddressingMode::Position`].

use crate::error::{Result, SpecError};
use crate::mode::AddressingMode;
use crate::opcode::Opcode;

/// Largest operand count of any defined instruction
pub const MAX_OPERANDS: usize = 3;

/// Decimal place of operand 0's mode digit
const FIRST_MODE_PLACE: i64 = 100;

/// Place value of the mode digit for operand `index`, if it fits in a word
#[inline]
fn mode_place(index: usize) -> Option<i64> {
    let exponent = u32::try_from(index).ok()?;
    10i64.checked_pow(exponent).and_then(|p| p.checked_mul(FIRST_MODE_PLACE))
}

/// Extract the opcode number (low two digits) from an instruction word
#[inline]
pub fn base_opcode(word: i64) -> i64 {
    word % Opcode::MODULUS
}

/// Decode the addressing mode of operand `index` from an instruction word
pub fn decode_mode(word: i64, index: usize) -> Result<AddressingMode> {
    let digit = match mode_place(index) {
        Some(place) => (word / place) % 10,
        None => 0,
    };
    AddressingMode::from_digit(digit, word)
}

/// Decode the addressing modes of the first `count` operands
pub fn decode_modes(word: i64, count: usize) -> Result<Vec<AddressingMode>> {
    (0..count).map(|index| decode_mode(word, index)).collect()
}

/// Encode operand modes into the mode portion of an instruction word.
///
/// The result is a multiple of 100; add the opcode number to get a full word.
pub fn encode_modes(modes: &[AddressingMode]) -> i64 {
    let mut place = FIRST_MODE_PLACE;
    let mut result = 0;
    for mode in modes {
        result += mode.digit() * place;
        place = place.saturating_mul(10);
    }
    result
}

/// Build the words for one instruction from its opcode and `(mode, value)`
/// operands
///
/// ```
/// use intcode_spec::{encode_instruction, AddressingMode::*, Opcode};
///
/// let words = encode_instruction(Opcode::Mul, &[(Position, 4), (Immediate, 3), (Position, 4)]).unwrap();
/// assert_eq!(words, vec![1002, 4, 3, 4]);
/// ```
pub fn encode_instruction(opcode: Opcode, operands: &[(AddressingMode, i64)]) -> Result<Vec<i64>> {
    if operands.len() != opcode.operand_count() {
        return Err(SpecError::OperandCount {
            opcode,
            expected: opcode.operand_count(),
            found: operands.len(),
        });
    }

    let modes: Vec<AddressingMode> = operands.iter().map(|(mode, _)| *mode).collect();
    let mut words = Vec::with_capacity(1 + operands.len());
    words.push(i64::from(opcode.to_u8()) + encode_modes(&modes));
    words.extend(operands.iter().map(|(_, value)| *value));
    Ok(words)
}
