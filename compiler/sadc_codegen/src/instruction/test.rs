use proptest::{
    prop_assert_eq, prop_oneof, proptest,
    strategy::{Just, Strategy},
};

use super::{disassemble, DecodeError, Instruction};

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        proptest::num::u8::ANY.prop_map(Instruction::LoadAccumulatorConstant),
        proptest::num::u8::ANY.prop_map(Instruction::LoadAccumulator),
        proptest::num::u8::ANY.prop_map(Instruction::StoreAccumulator),
        proptest::num::u8::ANY.prop_map(Instruction::AddWithCarry),
        proptest::num::u8::ANY.prop_map(Instruction::LoadXConstant),
        proptest::num::u8::ANY.prop_map(Instruction::LoadX),
        proptest::num::u8::ANY.prop_map(Instruction::LoadYConstant),
        proptest::num::u8::ANY.prop_map(Instruction::LoadY),
        proptest::num::u8::ANY.prop_map(Instruction::CompareX),
        proptest::num::u8::ANY.prop_map(Instruction::BranchNotEqual),
        Just(Instruction::SystemCall),
    ]
}

#[test]
fn absolute_operands_are_little_endian() {
    let mut bytes = Vec::new();
    Instruction::StoreAccumulator(0x2A).encode(&mut bytes);
    Instruction::LoadAccumulatorConstant(0x05).encode(&mut bytes);
    Instruction::Break.encode(&mut bytes);

    assert_eq!(bytes, [0x8D, 0x2A, 0x00, 0xA9, 0x05, 0x00]);
}

#[test]
fn mnemonics() {
    assert_eq!(Instruction::LoadAccumulatorConstant(5).to_string(), "LDA #$05");
    assert_eq!(Instruction::LoadY(0x11).to_string(), "LDY $0011");
    assert_eq!(Instruction::BranchNotEqual(0xF0).to_string(), "BNE $F0");
    assert_eq!(Instruction::SystemCall.to_string(), "SYS");
}

#[test]
fn decode_errors() {
    assert_eq!(
        Instruction::decode(&[0x12], 0),
        Err(DecodeError::UnknownOpcode { opcode: 0x12, offset: 0 })
    );
    assert_eq!(
        Instruction::decode(&[0xA9, 0x01, 0x8D, 0x10], 2),
        Err(DecodeError::Truncated { offset: 2 })
    );
    assert_eq!(disassemble(&[0xFF]), Err(DecodeError::Truncated { offset: 1 }));
}

proptest! {
    #[test]
    fn disassemble_recovers_the_program(
        program in proptest::collection::vec(instruction_strategy(), 0..32)
    ) {
        let mut bytes = Vec::new();
        for instruction in &program {
            instruction.encode(&mut bytes);
        }
        Instruction::Break.encode(&mut bytes);

        // trailing data after `BRK` is not code
        bytes.extend([0xAB, 0xCD]);

        let decoded = disassemble(&bytes).unwrap();

        prop_assert_eq!(decoded.len(), program.len() + 1);
        prop_assert_eq!(
            decoded.iter().map(|x| x.1).collect::<Vec<_>>(),
            program
                .iter()
                .copied()
                .chain(std::iter::once(Instruction::Break))
                .collect::<Vec<_>>()
        );

        let mut offset = 0;
        for (at, instruction) in decoded {
            prop_assert_eq!(at, offset);
            offset += instruction.len();
        }
    }
}
