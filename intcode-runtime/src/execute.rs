//! Instruction execution rules
//!
//! Each rule receives the full instruction word (for its mode digits), the
//! raw operand words, and the machine. Operands are resolved here, not at
//! fetch time, because only the rule knows which operands are destinations.

use crate::error::Fault;
use crate::io::IOHandler;
use crate::state::VMState;
use tracing::debug;

/// What the engine does with the program counter after a rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance past the instruction, unless it jumped
    Continue,
    /// Leave the program counter on this instruction and suspend
    Blocked,
}

/// Signature shared by every execution rule
pub type ExecFn = fn(word: i64, operands: &[i64], state: &mut VMState, io: &mut IOHandler) -> Result<Flow, Fault>;

/// Three-operand rule: `mem[c] = op(a, b)`
#[inline]
fn binary(
    word: i64,
    operands: &[i64],
    state: &mut VMState,
    op: impl FnOnce(i64, i64) -> Option<i64>,
) -> Result<Flow, Fault> {
    let a = state.fetch(word, 0, operands[0])?;
    let b = state.fetch(word, 1, operands[1])?;
    let result = op(a, b).ok_or(Fault::ArithmeticOverflow { pc: state.pc })?;
    state.store(word, 2, operands[2], result)?;
    Ok(Flow::Continue)
}

pub fn add(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    binary(word, operands, state, i64::checked_add)
}

pub fn mul(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    binary(word, operands, state, i64::checked_mul)
}

pub fn less_than(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    binary(word, operands, state, |a, b| Some(i64::from(a < b)))
}

pub fn equals(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    binary(word, operands, state, |a, b| Some(i64::from(a == b)))
}

pub fn input(word: i64, operands: &[i64], state: &mut VMState, io: &mut IOHandler) -> Result<Flow, Fault> {
    // Resolve first so a bad destination faults even with an empty queue
    let address = state.destination(word, 0, operands[0])?;
    match io.read() {
        Some(value) => {
            state.memory.write(address, value);
            Ok(Flow::Continue)
        }
        None => Ok(Flow::Blocked),
    }
}

pub fn output(word: i64, operands: &[i64], state: &mut VMState, io: &mut IOHandler) -> Result<Flow, Fault> {
    let value = state.fetch(word, 0, operands[0])?;
    io.write(value);
    Ok(Flow::Continue)
}

pub fn jump_if_true(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    if state.fetch(word, 0, operands[0])? != 0 {
        let target = state.fetch(word, 1, operands[1])?;
        state.jump(target)?;
    }
    Ok(Flow::Continue)
}

pub fn jump_if_false(word: i64, operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    if state.fetch(word, 0, operands[0])? == 0 {
        let target = state.fetch(word, 1, operands[1])?;
        state.jump(target)?;
    }
    Ok(Flow::Continue)
}

pub fn adjust_relative_base(
    word: i64,
    operands: &[i64],
    state: &mut VMState,
    _io: &mut IOHandler,
) -> Result<Flow, Fault> {
    let delta = state.fetch(word, 0, operands[0])?;
    state.adjust_relative_base(delta)?;
    debug!(pc = state.pc, relative_base = state.relative_base, "relative base adjusted");
    Ok(Flow::Continue)
}

pub fn halt(_word: i64, _operands: &[i64], state: &mut VMState, _io: &mut IOHandler) -> Result<Flow, Fault> {
    state.halt();
    Ok(Flow::Continue)
}
