//! Contains the [`Instruction`] set of the target machine together with its
//! binary encoding.

use std::fmt::Display;

/// An instruction of the target machine.
///
/// Absolute operands are memory addresses; they are encoded as two bytes,
/// little-endian, with the high byte always zero since the machine only has
/// 256 bytes of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Instruction {
    /// `A9`: loads the accumulator with a constant.
    LoadAccumulatorConstant(u8),

    /// `AD`: loads the accumulator from memory.
    LoadAccumulator(u8),

    /// `8D`: stores the accumulator in memory.
    StoreAccumulator(u8),

    /// `6D`: adds the contents of memory to the accumulator.
    AddWithCarry(u8),

    /// `A2`: loads the X register with a constant.
    LoadXConstant(u8),

    /// `AE`: loads the X register from memory.
    LoadX(u8),

    /// `A0`: loads the Y register with a constant.
    LoadYConstant(u8),

    /// `AC`: loads the Y register from memory.
    LoadY(u8),

    /// `EC`: compares the X register with memory, setting the zero flag when
    /// they are equal.
    CompareX(u8),

    /// `D0`: branches forward by the given number of bytes, wrapping around
    /// memory, when the zero flag is clear.
    BranchNotEqual(u8),

    /// `FF`: prints the integer in the Y register when X is 1, or the
    /// null-terminated string at the address in the Y register when X is 2.
    SystemCall,

    /// `00`: halts the machine.
    Break,
}

/// The bytes of an image could not be decoded into an [`Instruction`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
pub enum DecodeError {
    /// The byte at the given offset is not an opcode.
    #[error("unknown opcode `{opcode:02X}` at offset {offset:02X}")]
    UnknownOpcode {
        /// The offending byte.
        opcode: u8,

        /// Where it was found.
        offset: usize,
    },

    /// The last instruction is missing some of its operand bytes.
    #[error("instruction at offset {offset:02X} is cut short")]
    Truncated {
        /// Where the instruction starts.
        offset: usize,
    },
}

impl Instruction {
    /// Gets the opcode of the instruction.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::LoadAccumulatorConstant(_) => 0xA9,
            Self::LoadAccumulator(_) => 0xAD,
            Self::StoreAccumulator(_) => 0x8D,
            Self::AddWithCarry(_) => 0x6D,
            Self::LoadXConstant(_) => 0xA2,
            Self::LoadX(_) => 0xAE,
            Self::LoadYConstant(_) => 0xA0,
            Self::LoadY(_) => 0xAC,
            Self::CompareX(_) => 0xEC,
            Self::BranchNotEqual(_) => 0xD0,
            Self::SystemCall => 0xFF,
            Self::Break => 0x00,
        }
    }

    /// Gets the number of bytes the instruction takes, opcode included.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        match self {
            Self::LoadAccumulatorConstant(_)
            | Self::LoadXConstant(_)
            | Self::LoadYConstant(_)
            | Self::BranchNotEqual(_) => 2,

            Self::LoadAccumulator(_)
            | Self::StoreAccumulator(_)
            | Self::AddWithCarry(_)
            | Self::LoadX(_)
            | Self::LoadY(_)
            | Self::CompareX(_) => 3,

            Self::SystemCall | Self::Break => 1,
        }
    }

    /// Appends the encoding of the instruction to `bytes`.
    pub fn encode(self, bytes: &mut Vec<u8>) {
        bytes.push(self.opcode());

        match self {
            Self::LoadAccumulatorConstant(constant)
            | Self::LoadXConstant(constant)
            | Self::LoadYConstant(constant)
            | Self::BranchNotEqual(constant) => bytes.push(constant),

            Self::LoadAccumulator(address)
            | Self::StoreAccumulator(address)
            | Self::AddWithCarry(address)
            | Self::LoadX(address)
            | Self::LoadY(address)
            | Self::CompareX(address) => bytes.extend([address, 0x00]),

            Self::SystemCall | Self::Break => {}
        }
    }

    /// Decodes the instruction starting at `offset`.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`].
    pub fn decode(bytes: &[u8], offset: usize) -> Result<Self, DecodeError> {
        let operand = |index: usize| {
            bytes
                .get(offset + index)
                .copied()
                .ok_or(DecodeError::Truncated { offset })
        };

        let opcode = operand(0)?;

        let instruction = match opcode {
            0xA9 => Self::LoadAccumulatorConstant(operand(1)?),
            0xAD => Self::LoadAccumulator(operand(1)?),
            0x8D => Self::StoreAccumulator(operand(1)?),
            0x6D => Self::AddWithCarry(operand(1)?),
            0xA2 => Self::LoadXConstant(operand(1)?),
            0xAE => Self::LoadX(operand(1)?),
            0xA0 => Self::LoadYConstant(operand(1)?),
            0xAC => Self::LoadY(operand(1)?),
            0xEC => Self::CompareX(operand(1)?),
            0xD0 => Self::BranchNotEqual(operand(1)?),
            0xFF => Self::SystemCall,
            0x00 => Self::Break,
            opcode => {
                return Err(DecodeError::UnknownOpcode { opcode, offset })
            }
        };

        // the high byte of an absolute operand
        if instruction.len() == 3 {
            operand(2)?;
        }

        Ok(instruction)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadAccumulatorConstant(constant) => {
                write!(f, "LDA #${constant:02X}")
            }
            Self::LoadAccumulator(address) => write!(f, "LDA ${address:04X}"),
            Self::StoreAccumulator(address) => write!(f, "STA ${address:04X}"),
            Self::AddWithCarry(address) => write!(f, "ADC ${address:04X}"),
            Self::LoadXConstant(constant) => write!(f, "LDX #${constant:02X}"),
            Self::LoadX(address) => write!(f, "LDX ${address:04X}"),
            Self::LoadYConstant(constant) => write!(f, "LDY #${constant:02X}"),
            Self::LoadY(address) => write!(f, "LDY ${address:04X}"),
            Self::CompareX(address) => write!(f, "CPX ${address:04X}"),
            Self::BranchNotEqual(offset) => write!(f, "BNE ${offset:02X}"),
            Self::SystemCall => f.write_str("SYS"),
            Self::Break => f.write_str("BRK"),
        }
    }
}

/// Decodes the program at the start of `bytes`, up to and including the
/// first [`Instruction::Break`]. Each instruction is paired with its offset.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn disassemble(
    bytes: &[u8],
) -> Result<Vec<(usize, Instruction)>, DecodeError> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    loop {
        let instruction = Instruction::decode(bytes, offset)?;
        instructions.push((offset, instruction));
        offset += instruction.len();

        if instruction == Instruction::Break {
            return Ok(instructions);
        }
    }
}

#[cfg(test)]
mod test;
