/*!
# Rust Language Module

This Rust module reads Intcode program text and the line-oriented
integer format used for input and output.

*/

/// One memory cell; also the unit of input and output.
pub type Word = i64;
/// A resolved, non-negative memory address.
pub type Address = usize;
pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, Token};
pub use line::{read_value, read_values, write_value};
pub use parse::parse;
