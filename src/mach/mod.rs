/*!
## Rust Machine Module

This Rust module is the Intcode virtual machine: memory, decoder,
execution engine, channels, and the drivers that run one program or
a pipeline of them.

*/

pub use crate::lang::{Address, Word};

mod channel;
mod instruction;
mod listing;
mod memory;
mod opcode;
mod operation;
mod pipeline;
mod program;
mod runtime;

pub use channel::Channel;
pub use instruction::Instruction;
pub use listing::Listing;
pub use memory::Memory;
pub use opcode::{Mode, Opcode};
pub use operation::{Operation, Outcome, Registers, Wait};
pub use pipeline::{Handle, Pipeline, Topology};
pub use program::{Program, State};
pub use runtime::{Event, Runtime};

#[cfg(test)]
mod tests;
