use super::{Address, Memory, Mode, Opcode, Word};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Decoded instruction
///
/// Built fresh on every fetch; memory may have rewritten itself since
/// the last time this address was decoded.

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    address: Address,
    word: Word,
    opcode: Opcode,
    modes: [Mode; 3],
    operands: [Word; 3],
}

impl Instruction {
    pub fn decode(memory: &Memory, address: Address) -> Result<Instruction> {
        let word = memory.fetch(address);
        let opcode = match Opcode::from_word(word) {
            Some(opcode) => opcode,
            None => return Err(error!(UnknownOpcode, address, word)),
        };
        let mut modes = [Mode::Position; 3];
        let mut operands = [0; 3];
        let mut prefix = word / 100;
        for index in 0..opcode.arity() {
            let digit = prefix % 10;
            prefix /= 10;
            modes[index] = match Mode::from_digit(digit) {
                Some(mode) => mode,
                None => return Err(error!(InvalidParameterMode, address, word, digit)),
            };
            operands[index] = memory.fetch(address + 1 + index);
        }
        Ok(Instruction {
            address,
            word,
            opcode,
            modes,
            operands,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The raw instruction word, modes included.
    pub fn word(&self) -> Word {
        self.word
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes[..self.opcode.arity()]
    }

    /// Operands exactly as stored, not yet resolved through their modes.
    pub fn operands(&self) -> &[Word] {
        &self.operands[..self.opcode.arity()]
    }

    pub fn len(&self) -> usize {
        self.opcode.len()
    }

    pub fn is_halt(&self) -> bool {
        self.opcode == Opcode::Halt
    }

    pub fn mode(&self, index: usize) -> Mode {
        self.modes[index]
    }

    pub fn operand(&self, index: usize) -> Word {
        self.operands[index]
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (index, (mode, operand)) in self.modes().iter().zip(self.operands()).enumerate() {
            let sep = if index == 0 { " " } else { ", " };
            match mode {
                Mode::Position => write!(f, "{}[{}]", sep, operand)?,
                Mode::Immediate => write!(f, "{}{}", sep, operand)?,
                Mode::Relative => write!(f, "{}[rb{:+}]", sep, operand)?,
            }
        }
        Ok(())
    }
}
