//! Instruction catalog and instruction sets
//!
//! Every instruction is a static descriptor pairing an opcode with its
//! execution rule. An [`InstructionSet`] is a lookup table from opcode number
//! to descriptor; the machine dispatches through whatever set it was given.
//!
//! | Set | Opcodes |
//! |---|---|
//! | `minimal` | add, mul, in, out, halt |
//! | `control_flow` | minimal + jnz, jz, lt, eq |
//! | `relative` | control_flow + arb |

use crate::error::RuntimeError;
use crate::execute::{self, ExecFn};
use intcode_spec::Opcode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Immutable instruction descriptor
pub struct Instruction {
    pub opcode: Opcode,
    pub exec: ExecFn,
}

impl Instruction {
    /// Number of operand words following the instruction word
    #[inline]
    pub const fn operands(&self) -> usize {
        self.opcode.operand_count()
    }

    /// Words occupied by the instruction, including the instruction word
    #[inline]
    pub const fn width(&self) -> u64 {
        1 + self.operands() as u64
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &self.opcode)
            .field("operands", &self.operands())
            .finish()
    }
}

// ========== Catalog ==========

pub static ADD: Instruction = Instruction { opcode: Opcode::Add, exec: execute::add };
pub static MUL: Instruction = Instruction { opcode: Opcode::Mul, exec: execute::mul };
pub static INPUT: Instruction = Instruction { opcode: Opcode::Input, exec: execute::input };
pub static OUTPUT: Instruction = Instruction { opcode: Opcode::Output, exec: execute::output };
pub static JUMP_IF_TRUE: Instruction = Instruction { opcode: Opcode::JumpIfTrue, exec: execute::jump_if_true };
pub static JUMP_IF_FALSE: Instruction = Instruction { opcode: Opcode::JumpIfFalse, exec: execute::jump_if_false };
pub static LESS_THAN: Instruction = Instruction { opcode: Opcode::LessThan, exec: execute::less_than };
pub static EQUALS: Instruction = Instruction { opcode: Opcode::Equals, exec: execute::equals };
pub static ADJUST_RELATIVE_BASE: Instruction = Instruction {
    opcode: Opcode::AdjustRelativeBase,
    exec: execute::adjust_relative_base,
};
pub static HALT: Instruction = Instruction { opcode: Opcode::Halt, exec: execute::halt };

/// Look up the catalog descriptor for an opcode
pub fn catalog(opcode: Opcode) -> &'static Instruction {
    match opcode {
        Opcode::Add => &ADD,
        Opcode::Mul => &MUL,
        Opcode::Input => &INPUT,
        Opcode::Output => &OUTPUT,
        Opcode::JumpIfTrue => &JUMP_IF_TRUE,
        Opcode::JumpIfFalse => &JUMP_IF_FALSE,
        Opcode::LessThan => &LESS_THAN,
        Opcode::Equals => &EQUALS,
        Opcode::AdjustRelativeBase => &ADJUST_RELATIVE_BASE,
        Opcode::Halt => &HALT,
    }
}

// ========== Instruction sets ==========

const TABLE_SIZE: usize = Opcode::MODULUS as usize;

/// Mapping from opcode number to instruction
#[derive(Clone, Copy)]
pub struct InstructionSet {
    table: [Option<&'static Instruction>; TABLE_SIZE],
}

impl InstructionSet {
    /// A set with no instructions
    pub fn empty() -> Self {
        Self { table: [None; TABLE_SIZE] }
    }

    /// Add (or replace) one instruction
    pub fn with(mut self, instruction: &'static Instruction) -> Self {
        self.table[usize::from(instruction.opcode.to_u8())] = Some(instruction);
        self
    }

    /// Build a set from catalog opcodes
    pub fn from_opcodes(opcodes: &[Opcode]) -> Self {
        opcodes.iter().fold(Self::empty(), |set, &op| set.with(catalog(op)))
    }

    /// add, mul, in, out, halt
    pub fn minimal() -> Self {
        Self::from_opcodes(&[Opcode::Add, Opcode::Mul, Opcode::Input, Opcode::Output, Opcode::Halt])
    }

    /// The minimal set plus jumps and comparisons
    pub fn control_flow() -> Self {
        Self::minimal()
            .with(&JUMP_IF_TRUE)
            .with(&JUMP_IF_FALSE)
            .with(&LESS_THAN)
            .with(&EQUALS)
    }

    /// The control-flow set plus relative-base adjustment
    pub fn relative() -> Self {
        Self::control_flow().with(&ADJUST_RELATIVE_BASE)
    }

    /// Find the instruction for a full instruction word
    #[inline]
    pub fn decode(&self, word: i64) -> Option<&'static Instruction> {
        if word < 0 {
            return None;
        }
        self.table[(word % Opcode::MODULUS) as usize]
    }

    #[inline]
    pub fn contains(&self, opcode: Opcode) -> bool {
        self.table[usize::from(opcode.to_u8())].is_some()
    }

    /// Opcodes in this set, in numeric order
    pub fn opcodes(&self) -> impl Iterator<Item = Opcode> + '_ {
        self.table.iter().flatten().map(|inst| inst.opcode)
    }

    pub fn len(&self) -> usize {
        self.opcodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::relative()
    }
}

impl fmt::Debug for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.opcodes()).finish()
    }
}

/// Named instruction set, for choosing one from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstructionSetKind {
    Minimal,
    ControlFlow,
    #[default]
    Relative,
}

impl InstructionSetKind {
    pub fn instruction_set(self) -> InstructionSet {
        match self {
            InstructionSetKind::Minimal => InstructionSet::minimal(),
            InstructionSetKind::ControlFlow => InstructionSet::control_flow(),
            InstructionSetKind::Relative => InstructionSet::relative(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            InstructionSetKind::Minimal => "minimal",
            InstructionSetKind::ControlFlow => "control-flow",
            InstructionSetKind::Relative => "relative",
        }
    }
}

impl FromStr for InstructionSetKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(InstructionSetKind::Minimal),
            "control-flow" => Ok(InstructionSetKind::ControlFlow),
            "relative" => Ok(InstructionSetKind::Relative),
            _ => Err(RuntimeError::UnknownInstructionSet(s.to_string())),
        }
    }
}

impl fmt::Display for InstructionSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<InstructionSetKind> for InstructionSet {
    fn from(kind: InstructionSetKind) -> Self {
        kind.instruction_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_opcodes() {
        for op in Opcode::ALL {
            let inst = catalog(op);
            assert_eq!(inst.opcode, op);
            assert_eq!(inst.operands(), op.operand_count());
            assert_eq!(inst.width(), 1 + op.operand_count() as u64);
        }
    }

    #[test]
    fn test_minimal_set() {
        let set = InstructionSet::minimal();
        let ops: Vec<Opcode> = set.opcodes().collect();
        assert_eq!(
            ops,
            vec![Opcode::Add, Opcode::Mul, Opcode::Input, Opcode::Output, Opcode::Halt]
        );
        assert!(!set.contains(Opcode::JumpIfTrue));
    }

    #[test]
    fn test_set_nesting() {
        let minimal = InstructionSet::minimal();
        let control = InstructionSet::control_flow();
        let relative = InstructionSet::relative();

        assert_eq!(minimal.len(), 5);
        assert_eq!(control.len(), 9);
        assert_eq!(relative.len(), 10);

        assert!(minimal.opcodes().all(|op| control.contains(op)));
        assert!(control.opcodes().all(|op| relative.contains(op)));
        assert!(!control.contains(Opcode::AdjustRelativeBase));
        assert!(relative.contains(Opcode::AdjustRelativeBase));
    }

    #[test]
    fn test_decode_uses_low_digits() {
        let set = InstructionSet::relative();
        assert_eq!(set.decode(1002).map(|i| i.opcode), Some(Opcode::Mul));
        assert_eq!(set.decode(21107).map(|i| i.opcode), Some(Opcode::LessThan));
        assert!(set.decode(42).is_none());
        assert!(set.decode(-99).is_none());
        assert!(InstructionSet::minimal().decode(109).is_none());
    }

    #[test]
    fn test_custom_set() {
        let set = InstructionSet::empty().with(&OUTPUT).with(&HALT);
        assert_eq!(set.len(), 2);
        assert!(set.decode(104).is_some());
        assert!(set.decode(1).is_none());
        assert!(InstructionSet::empty().is_empty());
    }

    #[test]
    fn test_debug_lists_opcodes() {
        let set = InstructionSet::empty().with(&ADD).with(&HALT);
        assert_eq!(format!("{:?}", set), "{Add, Halt}");
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            InstructionSetKind::Minimal,
            InstructionSetKind::ControlFlow,
            InstructionSetKind::Relative,
        ] {
            assert_eq!(kind.name().parse::<InstructionSetKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
        assert!(matches!(
            "full".parse::<InstructionSetKind>(),
            Err(RuntimeError::UnknownInstructionSet(name)) if name == "full"
        ));
        assert_eq!(InstructionSetKind::default(), InstructionSetKind::Relative);
        assert_eq!(InstructionSet::from(InstructionSetKind::ControlFlow).len(), 9);
    }

    #[test]
    fn test_kind_deserializes_by_name() {
        use serde::de::value::{Error as ValueError, StrDeserializer};
        use serde::de::IntoDeserializer;

        let de: StrDeserializer<'_, ValueError> = "control-flow".into_deserializer();
        assert_eq!(InstructionSetKind::deserialize(de).unwrap(), InstructionSetKind::ControlFlow);

        let de: StrDeserializer<'_, ValueError> = "full".into_deserializer();
        assert!(InstructionSetKind::deserialize(de).is_err());
    }

    #[test]
    fn test_kind_serde_roundtrip() {
        for kind in [
            InstructionSetKind::Minimal,
            InstructionSetKind::ControlFlow,
            InstructionSetKind::Relative,
        ] {
            let bytes = bincode::serialize(&kind).unwrap();
            let decoded: InstructionSetKind = bincode::deserialize(&bytes).unwrap();
            assert_eq!(decoded, kind);
        }
    }
}
