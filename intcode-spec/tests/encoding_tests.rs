//! Encoding tests across the public API of intcode-spec

use intcode_spec::encoding::base_opcode;
use intcode_spec::{
    decode_mode, decode_modes, encode_instruction, encode_modes, AddressingMode, Opcode, Program,
    SpecError, MAX_OPERANDS,
};
use proptest::prelude::*;

// ============================================================================
// Examples from real programs
// ============================================================================

#[test]
fn test_known_instruction_words() {
    use AddressingMode::*;

    let cases: &[(i64, Opcode, &[AddressingMode])] = &[
        (1002, Opcode::Mul, &[Position, Immediate, Position]),
        (1101, Opcode::Add, &[Immediate, Immediate, Position]),
        (109, Opcode::AdjustRelativeBase, &[Immediate]),
        (204, Opcode::Output, &[Relative]),
        (203, Opcode::Input, &[Relative]),
        (1008, Opcode::Equals, &[Position, Immediate, Position]),
        (1006, Opcode::JumpIfFalse, &[Position, Immediate]),
        (1105, Opcode::JumpIfTrue, &[Immediate, Immediate]),
        (21107, Opcode::LessThan, &[Immediate, Immediate, Relative]),
        (99, Opcode::Halt, &[]),
    ];

    for (word, opcode, modes) in cases {
        assert_eq!(Opcode::from_word(*word), Some(*opcode), "word {word}");
        assert_eq!(
            decode_modes(*word, opcode.operand_count()).unwrap(),
            modes.to_vec(),
            "word {word}"
        );
    }
}

#[test]
fn test_mode_portion_of_every_three_digit_prefix() {
    // Every valid mode prefix for a three-operand instruction
    for prefix in 0..1000i64 {
        let digits = [prefix % 10, (prefix / 10) % 10, prefix / 100];
        if digits.iter().any(|d| *d > 2) {
            continue;
        }
        let word = prefix * 100 + 8;
        let modes = decode_modes(word, 3).unwrap();
        assert_eq!(encode_modes(&modes), word - base_opcode(word));
    }
}

#[test]
fn test_bad_mode_digit_reports_word() {
    // Hundreds digit belongs to the first operand
    let err = decode_mode(1902, 0).unwrap_err();
    assert_eq!(err, SpecError::InvalidModeDigit { word: 1902, digit: 9 });
    assert_eq!(decode_mode(1902, 1).unwrap(), AddressingMode::Immediate);

    let err = decode_mode(9002, 1).unwrap_err();
    assert_eq!(err, SpecError::InvalidModeDigit { word: 9002, digit: 9 });
}

#[test]
fn test_encoded_program_runs_through_text() {
    use AddressingMode::*;

    let mut words = encode_instruction(Opcode::Input, &[(Position, 9)]).unwrap();
    words.extend(encode_instruction(Opcode::Equals, &[(Position, 9), (Position, 10), (Position, 9)]).unwrap());
    words.extend(encode_instruction(Opcode::Output, &[(Position, 9)]).unwrap());
    words.extend(encode_instruction(Opcode::Halt, &[]).unwrap());
    words.extend([-1, 8]);

    let program = Program::new(words);
    assert_eq!(program.to_string(), "3,9,8,9,10,9,4,9,99,-1,8");
}

// ============================================================================
// Properties
// ============================================================================

fn arb_mode() -> impl Strategy<Value = AddressingMode> {
    prop::sample::select(AddressingMode::ALL.to_vec())
}

fn arb_opcode() -> impl Strategy<Value = Opcode> {
    prop::sample::select(Opcode::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_decode_encode_roundtrip(modes in prop::collection::vec(arb_mode(), 0..=MAX_OPERANDS)) {
        prop_assert_eq!(decode_modes(encode_modes(&modes), modes.len()).unwrap(), modes);
    }

    #[test]
    fn prop_encode_decode_roundtrip(op in arb_opcode(), digits in prop::collection::vec(0i64..=2, MAX_OPERANDS)) {
        let count = op.operand_count();
        let mode_portion: i64 = digits[..count]
            .iter()
            .enumerate()
            .map(|(i, d)| d * 10i64.pow(2 + i as u32))
            .sum();
        let word = i64::from(op.to_u8()) + mode_portion;

        let modes = decode_modes(word, count).unwrap();
        prop_assert_eq!(encode_modes(&modes), word - base_opcode(word));
    }

    #[test]
    fn prop_encode_instruction_layout(op in arb_opcode(), seed in prop::collection::vec((arb_mode(), any::<i64>()), MAX_OPERANDS)) {
        let operands = &seed[..op.operand_count()];
        let words = encode_instruction(op, operands).unwrap();

        prop_assert_eq!(words.len(), 1 + operands.len());
        prop_assert_eq!(Opcode::from_word(words[0]), Some(op));
        for (i, (mode, value)) in operands.iter().enumerate() {
            prop_assert_eq!(decode_mode(words[0], i).unwrap(), *mode);
            prop_assert_eq!(words[1 + i], *value);
        }
    }

    #[test]
    fn prop_program_text_roundtrip(words in prop::collection::vec(any::<i64>(), 0..64)) {
        let program = Program::new(words);
        let parsed: Program = program.to_string().parse().unwrap();
        prop_assert_eq!(parsed, program);
    }
}
