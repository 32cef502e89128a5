//! VM state for the Intcode machine

use crate::error::Fault;
use crate::memory::Memory;
use intcode_spec::{decode_mode, AddressingMode};

/// Execution status, as returned by every step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Ready to execute the instruction at the program counter
    Running,
    /// An input instruction found the queue empty. The program counter still
    /// points at it, so pushing input and stepping again retries it.
    BlockedOnInput,
    /// Terminal
    Halted(HaltReason),
    /// Terminal
    Faulted(Fault),
}

impl Status {
    /// Halted and faulted machines never step again
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Halted(_) | Status::Faulted(_))
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        matches!(self, Status::Halted(_))
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Status::BlockedOnInput)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// HALT instruction
    Explicit,
    /// The program counter reached the memory high-water mark
    RanOffEnd,
}

/// Registers and memory of one machine
#[derive(Debug, Clone)]
pub struct VMState {
    /// Address of the current instruction
    pub pc: u64,

    /// Base for relative-mode operands
    pub relative_base: i64,

    /// Cleared by HALT
    pub running: bool,

    /// Set when an instruction moved the program counter itself
    pub jumped: bool,

    pub memory: Memory,

    /// Instructions executed so far
    pub steps: u64,
}

impl VMState {
    pub fn new(program: &[i64]) -> Self {
        VMState {
            pc: 0,
            relative_base: 0,
            running: true,
            jumped: false,
            memory: Memory::from_words(program),
            steps: 0,
        }
    }

    /// Turn a signed address into a memory index
    #[inline]
    fn address(&self, address: i64) -> Result<u64, Fault> {
        u64::try_from(address).map_err(|_| Fault::NegativeAddress { pc: self.pc, address })
    }

    #[inline]
    fn mode(&self, word: i64, index: usize) -> Result<AddressingMode, Fault> {
        decode_mode(word, index).map_err(|_| Fault::InvalidMode { pc: self.pc, word })
    }

    /// Resolve operand `index` of instruction `word` to a value
    pub fn fetch(&self, word: i64, index: usize, operand: i64) -> Result<i64, Fault> {
        match self.mode(word, index)? {
            AddressingMode::Immediate => Ok(operand),
            AddressingMode::Position => Ok(self.memory.read(self.address(operand)?)),
            AddressingMode::Relative => {
                let address = self.relative(operand)?;
                Ok(self.memory.read(self.address(address)?))
            }
        }
    }

    /// Resolve operand `index` of instruction `word` to the address it
    /// writes to
    pub fn destination(&self, word: i64, index: usize, operand: i64) -> Result<u64, Fault> {
        match self.mode(word, index)? {
            AddressingMode::Immediate => Err(Fault::InvalidDestinationMode { pc: self.pc, word }),
            AddressingMode::Position => self.address(operand),
            AddressingMode::Relative => self.address(self.relative(operand)?),
        }
    }

    /// Write `value` through destination operand `index`
    pub fn store(&mut self, word: i64, index: usize, operand: i64, value: i64) -> Result<(), Fault> {
        let address = self.destination(word, index, operand)?;
        self.memory.write(address, value);
        Ok(())
    }

    #[inline]
    fn relative(&self, offset: i64) -> Result<i64, Fault> {
        self.relative_base
            .checked_add(offset)
            .ok_or(Fault::ArithmeticOverflow { pc: self.pc })
    }

    /// Move the program counter and suppress the automatic advance
    pub fn jump(&mut self, target: i64) -> Result<(), Fault> {
        self.pc = self.address(target)?;
        self.jumped = true;
        Ok(())
    }

    pub fn adjust_relative_base(&mut self, delta: i64) -> Result<(), Fault> {
        self.relative_base = self.relative(delta)?;
        Ok(())
    }

    /// Halt execution
    pub fn halt(&mut self) {
        self.running = false;
    }
}
