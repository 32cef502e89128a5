//! # Intcode Opcode Definitions
//!
//! The opcode is the instruction word modulo 100, so opcode numbers live in
//! 0-99. Only ten of them are defined:
//!
//! - 1-2: Arithmetic (ADD, MUL)
//! - 3-4: I/O (IN, OUT)
//! - 5-6: Jumps (JNZ, JZ)
//! - 7-8: Compare (LT, EQ)
//! - 9: Relative base (ARB)
//! - 99: HALT

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Arithmetic ==========
    /// ADD: mem[c] = a + b
    Add = 1,
    /// MUL: mem[c] = a * b
    Mul = 2,

    // ========== I/O ==========
    /// IN: mem[a] = next input (blocks when the input queue is empty)
    Input = 3,
    /// OUT: append a to the output queue
    Output = 4,

    // ========== Jumps ==========
    /// JNZ: if a != 0 { pc = b }
    JumpIfTrue = 5,
    /// JZ: if a == 0 { pc = b }
    JumpIfFalse = 6,

    // ========== Compare ==========
    /// LT: mem[c] = (a < b) ? 1 : 0
    LessThan = 7,
    /// EQ: mem[c] = (a == b) ? 1 : 0
    Equals = 8,

    // ========== Relative base ==========
    /// ARB: relative_base += a
    AdjustRelativeBase = 9,

    // ========== System ==========
    /// HALT: stop the machine
    Halt = 99,
}

impl Opcode {
    /// Instruction words are reduced modulo this value to find the opcode
    pub const MODULUS: i64 = 100;

    /// Every defined opcode, in numeric order
    pub const ALL: [Opcode; 10] = [
        Opcode::Add,
        Opcode::Mul,
        Opcode::Input,
        Opcode::Output,
        Opcode::JumpIfTrue,
        Opcode::JumpIfFalse,
        Opcode::LessThan,
        Opcode::Equals,
        Opcode::AdjustRelativeBase,
        Opcode::Halt,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Mul),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustRelativeBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract the opcode from a full instruction word.
    ///
    /// Negative words never name an instruction.
    #[inline]
    pub fn from_word(word: i64) -> Option<Self> {
        if word < 0 {
            return None;
        }
        Self::from_u8((word % Self::MODULUS) as u8)
    }

    /// Number of operand words that follow the instruction word
    #[inline]
    pub const fn operand_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Index of the operand this instruction writes to, if any
    #[inline]
    pub const fn destination(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }

    /// Check if this opcode can move the program counter somewhere other
    /// than the next instruction
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self, Opcode::JumpIfTrue | Opcode::JumpIfFalse)
    }

    /// Get the mnemonic name
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Mul => "mul",
            Opcode::Input => "in",
            Opcode::Output => "out",
            Opcode::JumpIfTrue => "jnz",
            Opcode::JumpIfFalse => "jz",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::AdjustRelativeBase => "arb",
            Opcode::Halt => "halt",
        }
    }
}

impl TryFrom<i64> for Opcode {
    type Error = SpecError;

    fn try_from(word: i64) -> Result<Self, Self::Error> {
        Self::from_word(word).ok_or(SpecError::UnknownOpcode(word))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
