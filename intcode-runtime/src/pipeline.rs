//! Multi-machine drivers
//!
//! Amplifier-style composition: each stage is a separate [`VM`] running the
//! same program, seeded with its own phase setting. A chain runs every stage
//! to completion once; a feedback pipeline routes the last stage's output
//! back to the first and keeps cycling, round-robin, until the last stage
//! halts.

use crate::error::PipelineError;
use crate::instruction::InstructionSet;
use crate::vm::VM;
use tracing::debug;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// How the stages of a pipeline are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Each stage runs once, start to finish
    Chain,
    /// The last stage feeds the first until the last stage halts
    Feedback,
}

/// Run one fresh machine per phase in series.
///
/// Stage `i` receives `[phases[i], signal]` and its last output becomes the
/// next signal.
pub fn run_chain(
    program: &[i64],
    instructions: InstructionSet,
    phases: &[i64],
    signal: i64,
) -> Result<i64> {
    if phases.is_empty() {
        return Err(PipelineError::EmptyPhases);
    }

    phases.iter().enumerate().try_fold(signal, |signal, (stage, &phase)| {
        let mut vm = VM::new(program, instructions, [phase, signal]);
        vm.run()?;
        vm.last_output().ok_or(PipelineError::NoOutput { stage })
    })
}

/// Run the stages as a feedback loop and return the final signal.
///
/// Every stage is started with its phase, then the signal is passed around
/// the ring. A stage runs until it blocks for more input or halts; whatever
/// it printed last is forwarded. Halted stages before the last one are
/// skipped. The result is the last output of the final stage once it halts.
pub fn run_feedback(
    program: &[i64],
    instructions: InstructionSet,
    phases: &[i64],
    signal: i64,
) -> Result<i64> {
    if phases.is_empty() {
        return Err(PipelineError::EmptyPhases);
    }

    let mut stages: Vec<VM> = phases
        .iter()
        .map(|&phase| VM::new(program, instructions, [phase]))
        .collect();
    let last = stages.len() - 1;

    let mut signal = signal;
    let mut final_output = None;
    let mut round = 0;

    loop {
        let mut progressed = false;

        for (stage, vm) in stages.iter_mut().enumerate() {
            if vm.status().is_terminal() {
                continue;
            }

            vm.push_input(signal);
            let status = vm.run_to_suspension()?;
            if let Some(&value) = vm.take_outputs().last() {
                signal = value;
                progressed = true;
                if stage == last {
                    final_output = Some(value);
                }
            }
            debug!(round, stage, ?status, signal, "stage suspended");
        }

        if stages[last].status().is_halted() {
            return final_output.ok_or(PipelineError::NoOutput { stage: last });
        }
        if !progressed {
            return Err(PipelineError::Deadlock { round });
        }
        round += 1;
    }
}

/// Try every ordering of `phases` and return the one giving the highest
/// final signal, starting from signal 0.
///
/// Ties keep the first ordering found.
pub fn best_phase_settings(
    program: &[i64],
    instructions: InstructionSet,
    phases: &[i64],
    mode: PipelineMode,
) -> Result<(Vec<i64>, i64)> {
    let mut best: Option<(Vec<i64>, i64)> = None;

    for settings in permutations(phases) {
        let signal = match mode {
            PipelineMode::Chain => run_chain(program, instructions, &settings, 0)?,
            PipelineMode::Feedback => run_feedback(program, instructions, &settings, 0)?,
        };
        if best.as_ref().map_or(true, |(_, top)| signal > *top) {
            best = Some((settings, signal));
        }
    }

    best.ok_or(PipelineError::EmptyPhases)
}

/// All orderings of `items` (Heap's algorithm)
fn permutations(items: &[i64]) -> Vec<Vec<i64>> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut items = items.to_vec();
    let mut counters = vec![0usize; items.len()];
    let mut result = vec![items.clone()];
    let mut i = 1;

    while i < items.len() {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            result.push(items.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    result
}
