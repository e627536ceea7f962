use super::{Address, Channel, Instruction, Memory, Mode, Opcode, Word};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub instruction_pointer: Address,
    pub relative_base: Word,
}

/// How an `Input` on an empty channel behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Suspend the calling thread until a value arrives.
    Block,
    /// Return `Outcome::Blocked` and leave everything untouched.
    Yield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Next(Registers),
    Blocked,
}

/// ## Execution engine
///
/// Applies one decoded instruction to memory and returns the registers
/// for the next cycle. `Halt` is never executed here; the driver stops
/// as soon as it decodes one.

pub struct Operation {}

impl Operation {
    pub fn execute(
        ins: &Instruction,
        memory: &mut Memory,
        registers: Registers,
        input: &Channel,
        output: &Channel,
        wait: Wait,
    ) -> Result<Outcome> {
        use Opcode::*;
        let base = registers.relative_base;
        let mut next = Registers {
            instruction_pointer: registers.instruction_pointer + ins.len(),
            relative_base: base,
        };
        match ins.opcode() {
            Add => {
                let (lhs, rhs) = Operation::read_2(ins, memory, base)?;
                let target = Operation::target(ins, 2, base)?;
                memory.write(target, Operation::sum(lhs, rhs)?)?;
            }
            Multiply => {
                let (lhs, rhs) = Operation::read_2(ins, memory, base)?;
                let target = Operation::target(ins, 2, base)?;
                memory.write(target, Operation::multiply(lhs, rhs)?)?;
            }
            Input => {
                let target = Operation::target(ins, 0, base)?;
                let value = match wait {
                    Wait::Block => input.receive()?,
                    Wait::Yield => match input.try_receive()? {
                        Some(value) => value,
                        None => return Ok(Outcome::Blocked),
                    },
                };
                memory.write(target, value)?;
            }
            Output => {
                let value = Operation::read(ins, 0, memory, base)?;
                output.send(value);
            }
            JumpIfNotZero => {
                if Operation::read(ins, 0, memory, base)? != 0 {
                    next.instruction_pointer = Operation::jump(ins, memory, base)?;
                }
            }
            JumpIfZero => {
                if Operation::read(ins, 0, memory, base)? == 0 {
                    next.instruction_pointer = Operation::jump(ins, memory, base)?;
                }
            }
            LessThan => {
                let (lhs, rhs) = Operation::read_2(ins, memory, base)?;
                let target = Operation::target(ins, 2, base)?;
                memory.write(target, (lhs < rhs) as Word)?;
            }
            Equals => {
                let (lhs, rhs) = Operation::read_2(ins, memory, base)?;
                let target = Operation::target(ins, 2, base)?;
                memory.write(target, (lhs == rhs) as Word)?;
            }
            AdjustRelativeBase => {
                let offset = Operation::read(ins, 0, memory, base)?;
                next.relative_base = Operation::sum(base, offset)?;
            }
            Halt => return Err(error!(InternalError; "HALT EXECUTED")),
        }
        Ok(Outcome::Next(next))
    }

    /// Resolves a read operand through its mode.
    pub fn read(ins: &Instruction, index: usize, memory: &Memory, base: Word) -> Result<Word> {
        let operand = ins.operand(index);
        match ins.mode(index) {
            Mode::Position => memory.read(operand),
            Mode::Immediate => Ok(operand),
            Mode::Relative => memory.read(Operation::relative(base, operand)?),
        }
    }

    /// Resolves a write target to an address. Immediate mode is never valid.
    pub fn target(ins: &Instruction, index: usize, base: Word) -> Result<Word> {
        let operand = ins.operand(index);
        match ins.mode(index) {
            Mode::Position => Ok(operand),
            Mode::Immediate => Err(error!(InvalidWriteTarget, operand)),
            Mode::Relative => Operation::relative(base, operand),
        }
    }

    fn read_2(ins: &Instruction, memory: &Memory, base: Word) -> Result<(Word, Word)> {
        let lhs = Operation::read(ins, 0, memory, base)?;
        let rhs = Operation::read(ins, 1, memory, base)?;
        Ok((lhs, rhs))
    }

    fn jump(ins: &Instruction, memory: &Memory, base: Word) -> Result<Address> {
        let dest = Operation::read(ins, 1, memory, base)?;
        if dest < 0 {
            return Err(error!(NegativeAddress, dest; "JUMP"));
        }
        Address::try_from(dest).map_err(|_| error!(Overflow, dest))
    }

    fn relative(base: Word, offset: Word) -> Result<Word> {
        match base.checked_add(offset) {
            Some(address) => Ok(address),
            None => Err(error!(Overflow, offset; "RELATIVE ADDRESS")),
        }
    }

    pub fn sum(lhs: Word, rhs: Word) -> Result<Word> {
        match lhs.checked_add(rhs) {
            Some(n) => Ok(n),
            None => Err(error!(Overflow)),
        }
    }

    pub fn multiply(lhs: Word, rhs: Word) -> Result<Word> {
        match lhs.checked_mul(rhs) {
            Some(n) => Ok(n),
            None => Err(error!(Overflow)),
        }
    }
}
