//! Virtual Machine for Intcode programs

use crate::error::{Fault, Result, RuntimeError};
use crate::execute::Flow;
use crate::instruction::{Instruction, InstructionSet};
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::state::{HaltReason, Status, VMState};
use intcode_spec::MAX_OPERANDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, trace, warn};

/// VM configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VMConfig {
    /// Emit a trace event for every executed instruction
    pub trace: bool,

    /// Maximum instructions per call to [`VM::run_to_suspension`] or
    /// [`VM::run`].
    ///
    /// `None` (the default) never gives up: a program that loops without
    /// halting or reading input keeps the caller busy forever.
    pub max_steps: Option<u64>,
}

/// Intcode Virtual Machine
///
/// A machine owns its memory and queues outright; several machines never
/// share state. Drivers compose them by moving values between queues.
#[derive(Debug, Clone)]
pub struct VM {
    /// VM state (program counter, relative base, memory)
    state: VMState,

    /// Input and output queues
    io: IOHandler,

    /// Opcodes this machine understands
    instructions: InstructionSet,

    /// Configuration
    config: VMConfig,

    status: Status,
}

impl VM {
    /// Create a new VM with a program, an instruction set and initial inputs
    pub fn new(
        program: impl AsRef<[i64]>,
        instructions: InstructionSet,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self::with_config(program, instructions, inputs, VMConfig::default())
    }

    pub fn with_config(
        program: impl AsRef<[i64]>,
        instructions: InstructionSet,
        inputs: impl IntoIterator<Item = i64>,
        config: VMConfig,
    ) -> Self {
        let state = VMState::new(program.as_ref());
        let status = if state.memory.high_water() == 0 {
            Status::Halted(HaltReason::RanOffEnd)
        } else {
            Status::Running
        };

        Self {
            state,
            io: IOHandler::new(inputs),
            instructions,
            config,
            status,
        }
    }

    /// Execute one instruction and return the new status.
    ///
    /// Faults are recorded in the status and also returned as errors.
    /// Stepping a halted or faulted machine is an error.
    pub fn step(&mut self) -> Result<Status> {
        if self.status.is_terminal() {
            return Err(RuntimeError::NotRunnable {
                status: self.status.clone(),
            });
        }

        match self.execute_next() {
            Ok(status) => {
                self.status = status.clone();
                Ok(status)
            }
            Err(fault) => {
                warn!(pc = fault.pc(), %fault, "machine faulted");
                self.status = Status::Faulted(fault.clone());
                Err(fault.into())
            }
        }
    }

    fn execute_next(&mut self) -> std::result::Result<Status, Fault> {
        let pc = self.state.pc;
        if pc >= self.state.memory.high_water() {
            debug!(pc, steps = self.state.steps, "ran off the end of memory");
            return Ok(Status::Halted(HaltReason::RanOffEnd));
        }

        let (word, inst) = self.fetch_and_decode()?;

        // Operand words are read raw; the rule resolves their modes
        let count = inst.operands();
        let mut operands = [0i64; MAX_OPERANDS];
        for (slot, addr) in operands[..count].iter_mut().zip(pc + 1..) {
            *slot = self.state.memory.read(addr);
        }
        let operands = &operands[..count];

        if self.config.trace {
            trace!(
                step = self.state.steps,
                pc,
                word,
                op = %inst.opcode,
                ?operands,
                relative_base = self.state.relative_base,
                "execute"
            );
        }

        self.state.jumped = false;
        let flow = (inst.exec)(word, operands, &mut self.state, &mut self.io)?;
        if flow == Flow::Blocked {
            debug!(pc, "blocked on input");
            return Ok(Status::BlockedOnInput);
        }
        self.state.steps += 1;

        if self.state.jumped {
            self.state.jumped = false;
        } else {
            self.state.pc = pc + inst.width();
        }

        if self.state.running {
            Ok(Status::Running)
        } else {
            debug!(pc, steps = self.state.steps, "halted");
            Ok(Status::Halted(HaltReason::Explicit))
        }
    }

    /// Fetch the word at the program counter and find its instruction
    fn fetch_and_decode(&self) -> std::result::Result<(i64, &'static Instruction), Fault> {
        let pc = self.state.pc;
        let word = self.state.memory.read(pc);
        let inst = self
            .instructions
            .decode(word)
            .ok_or(Fault::UnknownOpcode { pc, word })?;
        Ok((word, inst))
    }

    /// Step until the machine halts, faults or blocks on input
    pub fn run_to_suspension(&mut self) -> Result<Status> {
        let mut executed = 0u64;
        loop {
            if let Some(limit) = self.config.max_steps {
                if executed >= limit {
                    return Err(RuntimeError::StepLimitExceeded { limit });
                }
            }

            match self.step()? {
                Status::Running => executed += 1,
                status => return Ok(status),
            }
        }
    }

    /// Run to completion. Running out of input is an error here.
    pub fn run(&mut self) -> Result<HaltReason> {
        match self.run_to_suspension()? {
            Status::Halted(reason) => Ok(reason),
            Status::BlockedOnInput => Err(RuntimeError::InputExhausted { pc: self.state.pc }),
            status => Err(RuntimeError::NotRunnable { status }),
        }
    }

    pub fn push_input(&mut self, value: i64) {
        self.io.push_input(value);
    }

    pub fn extend_input(&mut self, values: impl IntoIterator<Item = i64>) {
        self.io.extend_inputs(values);
    }

    pub fn pending_inputs(&self) -> usize {
        self.io.pending_inputs()
    }

    /// Outputs not yet taken, oldest first
    pub fn outputs(&mut self) -> &[i64] {
        self.io.outputs()
    }

    pub fn pop_output(&mut self) -> Option<i64> {
        self.io.pop_output()
    }

    pub fn last_output(&self) -> Option<i64> {
        self.io.last_output()
    }

    pub fn take_outputs(&mut self) -> Vec<i64> {
        self.io.take_outputs()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn pc(&self) -> u64 {
        self.state.pc
    }

    pub fn relative_base(&self) -> i64 {
        self.state.relative_base
    }

    /// Instructions executed so far
    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    pub fn instruction_set(&self) -> &InstructionSet {
        &self.instructions
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    /// Non-zero memory cells by address
    pub fn memory_snapshot(&self) -> BTreeMap<u64, i64> {
        self.state.memory.snapshot()
    }

    /// Dense copy of the memory cells in `range`
    pub fn memory_range(&self, range: Range<u64>) -> Vec<i64> {
        self.state.memory.dump(range)
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }
}
