use super::operation::{Outcome, Registers, Wait};
use super::{Channel, Instruction, Memory, Operation, Word};
use crate::lang::{parse, Error};
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Running,
    /// Waiting on input from an empty channel.
    Blocked,
    Halted,
    Failed(Error),
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Halted | State::Failed(_))
    }
}

/// ## A single Intcode machine
///
/// Owns its memory and registers exclusively. The only way in or out is
/// through the two channels.

#[derive(Debug)]
pub struct Program {
    memory: Memory,
    registers: Registers,
    input: Channel,
    output: Channel,
    state: State,
}

impl Program {
    pub fn new(image: Vec<Word>, input: Channel, output: Channel) -> Program {
        Program {
            memory: Memory::new(image),
            registers: Registers::default(),
            input,
            output,
            state: State::Running,
        }
    }

    /// Loads program text with fresh, unconnected channels.
    pub fn load(text: &str) -> Result<Program> {
        Ok(Program::new(parse(text)?, Channel::new(), Channel::new()))
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// For patching the image before a run, e.g. setting noun and verb.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn input(&self) -> &Channel {
        &self.input
    }

    pub fn output(&self) -> &Channel {
        &self.output
    }

    /// Decodes and executes one instruction.
    ///
    /// A terminal program is never stepped again: `Halted` keeps returning
    /// `Ok(State::Halted)` and `Failed` keeps returning its error.
    pub fn step(&mut self, wait: Wait) -> Result<State> {
        match &self.state {
            State::Halted => return Ok(State::Halted),
            State::Failed(error) => return Err(error.clone()),
            State::Running | State::Blocked => {}
        }
        let ip = self.registers.instruction_pointer;
        let ins = match Instruction::decode(&self.memory, ip) {
            Ok(ins) => ins,
            Err(error) => return Err(self.fail(error)),
        };
        if ins.is_halt() {
            debug!(ip, "halted");
            self.state = State::Halted;
            return Ok(State::Halted);
        }
        trace!(ip, base = self.registers.relative_base, "{}", ins);
        match Operation::execute(
            &ins,
            &mut self.memory,
            self.registers,
            &self.input,
            &self.output,
            wait,
        ) {
            Ok(Outcome::Next(registers)) => {
                self.registers = registers;
                self.state = State::Running;
            }
            Ok(Outcome::Blocked) => {
                if self.state != State::Blocked {
                    debug!(ip, "blocked on input");
                }
                self.state = State::Blocked;
            }
            Err(error) => return Err(self.fail(error.in_instruction(ip, ins.word()))),
        }
        Ok(self.state.clone())
    }

    /// Moves the program to `Failed` and hands the error back.
    pub fn fail(&mut self, error: Error) -> Error {
        if error.is_cancelled() {
            debug!(%error, "cancelled");
        } else {
            warn!(%error, "program failed");
        }
        self.state = State::Failed(error.clone());
        error
    }
}
