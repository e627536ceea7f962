use super::lex::{lex, Token};
use super::{Error, Word};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Parses program text into the initial memory image.
///
/// The text is trimmed once; what remains must be comma separated,
/// optionally signed, decimal integers.
pub fn parse(text: &str) -> Result<Vec<Word>> {
    let tokens = lex(text.trim());
    let mut words = Vec::with_capacity(tokens.len() / 2 + 1);
    let mut expect_number = true;
    for token in &tokens {
        match token {
            Token::Number(col, s) if expect_number => match s.parse::<Word>() {
                Ok(word) => words.push(word),
                Err(_) => {
                    return Err(error!(MalformedProgramText, ..col; format!("OUT OF RANGE {}", s)))
                }
            },
            Token::Comma(_) if !expect_number => {}
            Token::Comma(col) => return Err(error!(MalformedProgramText, ..col; "MISSING NUMBER")),
            Token::Number(col, s) | Token::Unknown(col, s) => {
                return Err(error!(MalformedProgramText, ..col; s.as_str()))
            }
        }
        expect_number = !expect_number;
    }
    if expect_number {
        let end = tokens.last().map_or(0, |t| t.column().end);
        return Err(error!(MalformedProgramText, ..&(end..end + 1); "MISSING NUMBER"));
    }
    Ok(words)
}

#[cfg(test)]
#[path = "tests/parse_test.rs"]
mod tests;
