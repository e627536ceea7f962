use super::{Error, Word};
use crate::error;

/// Reads one value of the line-oriented wire format.
///
/// Blank lines carry no value and yield `Ok(None)`.
pub fn read_value(line: &str) -> Result<Option<Word>, Error> {
    let s = line.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<Word>() {
        Ok(word) => Ok(Some(word)),
        Err(_) => Err(error!(MalformedInput; s)),
    }
}

/// Formats one value of the line-oriented wire format, newline included.
pub fn write_value(word: Word) -> String {
    format!("{}\n", word)
}

/// Parses a list of values as given on a command line: commas or whitespace.
pub fn read_values(s: &str) -> Result<Vec<Word>, Error> {
    let mut words = vec![];
    for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
        if let Some(word) = read_value(token)? {
            words.push(word);
        }
    }
    Ok(words)
}
