//! I/O handling
//!
//! Input and output are plain word queues with no framing. Callers that
//! exchange multi-word messages pop the expected number of outputs.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct IOHandler {
    inputs: VecDeque<i64>,
    outputs: VecDeque<i64>,
}

impl IOHandler {
    pub fn new(inputs: impl IntoIterator<Item = i64>) -> Self {
        IOHandler {
            inputs: inputs.into_iter().collect(),
            outputs: VecDeque::new(),
        }
    }

    /// Take the next input, front to back
    pub fn read(&mut self) -> Option<i64> {
        self.inputs.pop_front()
    }

    pub fn write(&mut self, value: i64) {
        self.outputs.push_back(value);
    }

    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    pub fn extend_inputs(&mut self, values: impl IntoIterator<Item = i64>) {
        self.inputs.extend(values);
    }

    /// Number of inputs not yet consumed
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&mut self) -> &[i64] {
        self.inputs.make_contiguous()
    }

    pub fn outputs(&mut self) -> &[i64] {
        self.outputs.make_contiguous()
    }

    /// Remove the oldest output
    pub fn pop_output(&mut self) -> Option<i64> {
        self.outputs.pop_front()
    }

    pub fn last_output(&self) -> Option<i64> {
        self.outputs.back().copied()
    }

    pub fn take_outputs(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.outputs).into()
    }
}
