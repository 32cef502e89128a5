//! # Intcode Specification
//!
//! Shared definitions for the Intcode machine: opcode numbers, addressing
//! modes, the decimal opcode-word encoding, and the comma-separated program
//! text format.
//!
//! ## Instruction Words
//!
//! An instruction word packs the opcode in its two low decimal digits and one
//! addressing-mode digit per operand above them:
//!
//! ```text
//! 1002 = 02 (Mul) + 0·100 (op0: position) + 1·1000 (op1: immediate) + 0·10000 (op2: position)
//! ```

pub mod encoding;
pub mod error;
pub mod lexer;
pub mod mode;
pub mod opcode;
pub mod program;

pub use encoding::{decode_mode, decode_modes, encode_instruction, encode_modes, MAX_OPERANDS};
pub use error::{Result, SpecError};
pub use mode::AddressingMode;
pub use opcode::Opcode;
pub use program::Program;

/// Machine word. Memory cells, operands and I/O values are all words.
pub type Word = i64;

/// Memory address (always non-negative once resolved)
pub type Address = u64;
