//! # Intcode
//!
//! An interpreter for the Intcode instruction set: ten opcodes over a
//! sparse, growable memory of 64-bit integers, with position, immediate
//! and relative addressing.
//!
//! Programs talk to the world only through channels, one integer at a
//! time. Several programs can be wired into a chain or a feedback loop
//! and run concurrently.
//!
//! ```
//! use intcode::mach::{Event, Program, Runtime};
//!
//! let mut runtime = Runtime::new(Program::load("3,9,8,9,10,9,4,9,99,-1,8").unwrap());
//! runtime.input().send(8);
//! assert_eq!(runtime.execute(5000), Event::Halted);
//! assert_eq!(runtime.output().drain(), vec![1]);
//! ```
//!
//! The `intcode` executable runs a program file from a terminal:
//! ```text
//! $ echo 3,9,8,9,10,9,4,9,99,-1,8 > equals.txt
//! $ intcode equals.txt --input 8
//! 1
//! ```

pub mod lang;
pub mod mach;
