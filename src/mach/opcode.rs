use super::Word;

/// ## Virtual machine instruction set
///
/// An instruction word is `modes * 100 + opcode`. Operands follow the
/// word in memory; their count is fixed per opcode.
///
/// For example: `1002,4,3,4` is `Multiply` with modes position,
/// immediate, position: `mem[4] = mem[4] * 3`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Arithmetic
    /// Write operand 0 + operand 1 to operand 2.
    Add,
    /// Write operand 0 * operand 1 to operand 2.
    Multiply,

    // *** Channels
    /// Wait for one value on the input channel and write it to operand 0.
    Input,
    /// Send operand 0 to the output channel.
    Output,

    // *** Branch control
    /// Jump to operand 1 if operand 0 is not zero.
    JumpIfNotZero,
    /// Jump to operand 1 if operand 0 is zero.
    JumpIfZero,

    // *** Comparison
    /// Write 1 to operand 2 if operand 0 < operand 1, else 0.
    LessThan,
    /// Write 1 to operand 2 if operand 0 == operand 1, else 0.
    Equals,

    // *** Registers
    /// Add operand 0 to the relative base.
    AdjustRelativeBase,
    Halt,
}

impl Opcode {
    /// Decodes the low two decimal digits of an instruction word.
    pub fn from_word(word: Word) -> Option<Opcode> {
        use Opcode::*;
        if word < 0 {
            return None;
        }
        Some(match word % 100 {
            1 => Add,
            2 => Multiply,
            3 => Input,
            4 => Output,
            5 => JumpIfNotZero,
            6 => JumpIfZero,
            7 => LessThan,
            8 => Equals,
            9 => AdjustRelativeBase,
            99 => Halt,
            _ => return None,
        })
    }

    pub fn code(self) -> Word {
        use Opcode::*;
        match self {
            Add => 1,
            Multiply => 2,
            Input => 3,
            Output => 4,
            JumpIfNotZero => 5,
            JumpIfZero => 6,
            LessThan => 7,
            Equals => 8,
            AdjustRelativeBase => 9,
            Halt => 99,
        }
    }

    /// Cells consumed, the instruction word included.
    pub fn len(self) -> usize {
        use Opcode::*;
        match self {
            Add | Multiply | LessThan | Equals => 4,
            JumpIfNotZero | JumpIfZero => 3,
            Input | Output | AdjustRelativeBase => 2,
            Halt => 1,
        }
    }

    pub fn arity(self) -> usize {
        self.len() - 1
    }

    /// Index of the operand written to, if any.
    pub fn target(self) -> Option<usize> {
        use Opcode::*;
        match self {
            Add | Multiply | LessThan | Equals => Some(2),
            Input => Some(0),
            Output | JumpIfNotZero | JumpIfZero | AdjustRelativeBase | Halt => None,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Add => write!(f, "ADD"),
            Multiply => write!(f, "MUL"),
            Input => write!(f, "IN"),
            Output => write!(f, "OUT"),
            JumpIfNotZero => write!(f, "JNZ"),
            JumpIfZero => write!(f, "JZ"),
            LessThan => write!(f, "LT"),
            Equals => write!(f, "EQ"),
            AdjustRelativeBase => write!(f, "ARB"),
            Halt => write!(f, "HALT"),
        }
    }
}

/// ## Parameter modes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Operand is an address.
    Position,
    /// Operand is the value. Never valid for a write target.
    Immediate,
    /// Operand is an offset from the relative base.
    Relative,
}

impl Mode {
    pub fn from_digit(digit: Word) -> Option<Mode> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Position
    }
}
