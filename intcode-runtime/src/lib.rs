//! # Intcode Runtime
//!
//! Execute Intcode programs on a suspendable virtual machine.
//!
//! ## Features
//!
//! - **Sparse memory**: unwritten addresses read as zero, any non-negative
//!   address is writable
//! - **Three addressing modes**: position, immediate, relative
//! - **Pluggable instruction sets**: minimal, control-flow, relative, or a
//!   custom selection from the catalog
//! - **Blocking input**: an empty input queue suspends the machine instead of
//!   failing, so machines can be chained into feedback pipelines
//!
//! ## Example
//!
//! ```rust
//! use intcode_runtime::{InstructionSet, Status, VM};
//!
//! let mut vm = VM::new([3, 0, 4, 0, 99], InstructionSet::minimal(), []);
//! assert_eq!(vm.run_to_suspension().unwrap(), Status::BlockedOnInput);
//!
//! vm.push_input(7);
//! vm.run().unwrap();
//! assert_eq!(vm.take_outputs(), vec![7]);
//! ```

pub mod error;
pub mod execute;
pub mod instruction;
pub mod io;
pub mod memory;
pub mod pipeline;
pub mod state;
pub mod vm;

pub use error::{Fault, PipelineError, RuntimeError};
pub use instruction::{Instruction, InstructionSet, InstructionSetKind};
pub use io::IOHandler;
pub use memory::Memory;
pub use pipeline::{best_phase_settings, run_chain, run_feedback, PipelineMode};
pub use state::{HaltReason, Status, VMState};
pub use vm::{VMConfig, VM};

use intcode_spec::Program;

/// Simple execution helper
///
/// Runs a program to completion with the given inputs and returns the outputs.
pub fn run(
    program: impl AsRef<[i64]>,
    instructions: InstructionSet,
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, RuntimeError> {
    let mut vm = VM::new(program, instructions, inputs);
    vm.run()?;
    Ok(vm.take_outputs())
}

/// Parse comma-separated program text and run it like [`run`]
pub fn run_source(
    source: &str,
    instructions: InstructionSet,
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, RuntimeError> {
    let program = Program::parse(source)?;
    run(program, instructions, inputs)
}
