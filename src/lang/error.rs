use super::{Address, Column, Word};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    address: Option<Address>,
    opcode: Option<Word>,
    value: Option<Word>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $val:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).with_value($val)
    };
    ($err:ident, $val:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .with_value($val)
            .message($msg)
    };
    ($err:ident, $addr:expr, $op:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_instruction($addr, $op)
    };
    ($err:ident, $addr:expr, $op:expr, $val:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_instruction($addr, $op)
            .with_value($val)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            address: None,
            opcode: None,
            value: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Instruction pointer of the failing instruction, if it was executing.
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// Full instruction word (modes and opcode) at the failing address.
    pub fn opcode(&self) -> Option<Word> {
        self.opcode
    }

    /// The offending value: a negative address, a bad mode digit, an input token.
    pub fn value(&self) -> Option<Word> {
        self.value
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::Cancelled
    }

    /// Attaches the failing instruction. The first attachment wins so errors
    /// raised deep in memory access keep their origin.
    pub fn in_instruction(mut self, address: Address, opcode: Word) -> Error {
        if self.address.is_none() {
            self.address = Some(address);
            self.opcode = Some(opcode);
        }
        self
    }

    pub fn in_column(mut self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        self.column = column.clone();
        self
    }

    pub fn with_value(mut self, value: Word) -> Error {
        self.value = Some(value);
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        self.message = message.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MalformedProgramText = 1,
    MalformedInput = 2,
    UnknownOpcode = 3,
    InvalidParameterMode = 4,
    InvalidWriteTarget = 5,
    NegativeAddress = 6,
    Overflow = 7,
    Cancelled = 8,
    InternalError = 51,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        use ErrorCode::*;
        match self {
            MalformedProgramText => "MALFORMED PROGRAM TEXT",
            MalformedInput => "MALFORMED INPUT",
            UnknownOpcode => "UNKNOWN OPCODE",
            InvalidParameterMode => "INVALID PARAMETER MODE",
            InvalidWriteTarget => "INVALID WRITE TARGET",
            NegativeAddress => "NEGATIVE ADDRESS",
            Overflow => "OVERFLOW",
            Cancelled => "CANCELLED",
            InternalError => "INTERNAL ERROR",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        error!(InternalError; error.to_string())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = self.code.as_str().to_string();
        if let Some(value) = self.value {
            s.push_str(&format!(" {}", value));
        }
        if let Some(address) = self.address {
            s.push_str(&format!(" AT {}", address));
        }
        if let Some(opcode) = self.opcode {
            s.push_str(&format!(" (OPCODE {})", opcode));
        }
        if (0..0) != self.column {
            s.push_str(&format!(" IN ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            s.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}", s)
    }
}
