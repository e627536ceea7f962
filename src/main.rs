//! # Intcode
//!
//! Runs an Intcode program file from the terminal.
//!

mod term;

fn main() {
    term::main();
}
