use super::operation::Wait;
use super::{Channel, Program, State};
use crate::error;
use crate::lang::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a cooperative execution slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out; call `execute` again.
    Running,
    /// Waiting on input; send a value and call `execute` again.
    Blocked,
    Halted,
    Failed(Error),
}

/// ## Fetch-decode-execute driver
///
/// `run` drives one program to completion on the calling thread, blocking
/// whenever it waits for input. `execute` is the cooperative form for
/// callers that own the other end of the input channel on the same thread.

pub struct Runtime {
    program: Program,
    interrupted: Arc<AtomicBool>,
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime::with_interrupt(program, Arc::default())
    }

    /// Shares an interrupt flag, usually with sibling runtimes.
    pub fn with_interrupt(program: Program, interrupted: Arc<AtomicBool>) -> Runtime {
        Runtime {
            program,
            interrupted,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    pub fn input(&self) -> &Channel {
        self.program.input()
    }

    pub fn output(&self) -> &Channel {
        self.program.output()
    }

    /// Stops the program before its next instruction. A program blocked
    /// in `run` also needs its input channel closed to wake up.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.check_interrupt()?;
            match self.program.step(Wait::Block)? {
                State::Halted => return Ok(()),
                State::Running | State::Blocked => {}
                State::Failed(error) => return Err(error),
            }
        }
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            if let Err(error) = self.check_interrupt() {
                return Event::Failed(error);
            }
            match self.program.step(Wait::Yield) {
                Ok(State::Running) => {}
                Ok(State::Blocked) => return Event::Blocked,
                Ok(State::Halted) => return Event::Halted,
                Ok(State::Failed(error)) | Err(error) => return Event::Failed(error),
            }
        }
        Event::Running
    }

    fn check_interrupt(&mut self) -> Result<(), Error> {
        if self.program.state().is_terminal() || !self.interrupted.load(Ordering::Relaxed) {
            return Ok(());
        }
        let ip = self.program.registers().instruction_pointer;
        let word = self.program.memory().fetch(ip);
        Err(self
            .program
            .fail(error!(Cancelled; "INTERRUPTED").in_instruction(ip, word)))
    }
}
