//! Runtime error types for the Intcode VM

use crate::state::Status;
use intcode_spec::SpecError;
use thiserror::Error;

/// A fatal execution fault. The machine records it in
/// [`Status::Faulted`] and cannot be stepped again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("Unknown opcode in word {word} at PC {pc}")]
    UnknownOpcode { pc: u64, word: i64 },

    #[error("Immediate mode used for a destination operand in word {word} at PC {pc}")]
    InvalidDestinationMode { pc: u64, word: i64 },

    #[error("Invalid addressing mode in word {word} at PC {pc}")]
    InvalidMode { pc: u64, word: i64 },

    #[error("Negative address {address} at PC {pc}")]
    NegativeAddress { pc: u64, address: i64 },

    #[error("Arithmetic overflow at PC {pc}")]
    ArithmeticOverflow { pc: u64 },
}

impl Fault {
    /// Address of the instruction that faulted
    pub fn pc(&self) -> u64 {
        match self {
            Fault::UnknownOpcode { pc, .. }
            | Fault::InvalidDestinationMode { pc, .. }
            | Fault::InvalidMode { pc, .. }
            | Fault::NegativeAddress { pc, .. }
            | Fault::ArithmeticOverflow { pc } => *pc,
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid program: {0}")]
    Spec(#[from] SpecError),

    #[error("Fault: {0}")]
    Fault(#[from] Fault),

    #[error("Machine cannot be stepped: {status:?}")]
    NotRunnable { status: Status },

    #[error("Input exhausted at PC {pc}")]
    InputExhausted { pc: u64 },

    #[error("Step limit exceeded: {limit}")]
    StepLimitExceeded { limit: u64 },

    #[error("Unknown instruction set: {0}")]
    UnknownInstructionSet(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while driving several machines together
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Stage {stage} produced no output")]
    NoOutput { stage: usize },

    #[error("Pipeline made no progress in round {round}")]
    Deadlock { round: usize },

    #[error("Pipeline needs at least one phase setting")]
    EmptyPhases,
}
