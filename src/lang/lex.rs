use super::Column;

/// Splits trimmed program text into numbers and commas.
/// Anything else becomes `Token::Unknown` and is rejected by the parser.
pub fn lex(s: &str) -> Vec<Token> {
    ProgramLexer::lex(s)
}

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(Column, String),
    Number(Column, String),
    Comma(Column),
}

impl Token {
    pub fn column(&self) -> &Column {
        match self {
            Token::Unknown(col, _) | Token::Number(col, _) | Token::Comma(col) => col,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Unknown(_, s) | Token::Number(_, s) => write!(f, "{}", s),
            Token::Comma(_) => write!(f, ","),
        }
    }
}

fn is_sign(c: char) -> bool {
    c == '-' || c == '+'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::CharIndices<'a>>;

    fn end(&mut self) -> usize;

    fn number(&mut self) -> Option<Token> {
        let (start, first) = self.chars().next()?;
        let mut s = first.to_string();
        while let Some((_, pk)) = self.chars().peek() {
            if !pk.is_ascii_digit() {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        let end = self.end();
        if s.len() == 1 && is_sign(first) {
            return Some(Token::Unknown(start..end, s));
        }
        Some(Token::Number(start..end, s))
    }

    fn comma(&mut self) -> Option<Token> {
        let (start, _) = self.chars().next()?;
        Some(Token::Comma(start..start + 1))
    }

    fn minutia(&mut self) -> Option<Token> {
        let (start, first) = self.chars().next()?;
        let mut s = first.to_string();
        while let Some((_, pk)) = self.chars().peek() {
            if *pk == ',' {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        let end = self.end();
        Some(Token::Unknown(start..end, s))
    }
}

struct ProgramLexer<'a> {
    len: usize,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizers<'a> for ProgramLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::CharIndices<'a>> {
        &mut self.chars
    }

    fn end(&mut self) -> usize {
        let len = self.len;
        self.chars.peek().map_or(len, |(index, _)| *index)
    }
}

impl<'a> Iterator for ProgramLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, pk) = *self.chars.peek()?;
        if pk == ',' {
            return self.comma();
        }
        if pk.is_ascii_digit() || is_sign(pk) {
            let token = self.number()?;
            let glued = match self.chars.peek() {
                Some((_, ch)) => *ch != ',',
                None => false,
            };
            return match token {
                // Trailing junk makes the whole token malformed.
                Token::Number(col, mut s) if glued => {
                    let end = match self.minutia() {
                        Some(Token::Unknown(rest, tail)) => {
                            s.push_str(&tail);
                            rest.end
                        }
                        _ => col.end,
                    };
                    Some(Token::Unknown(col.start..end, s))
                }
                token => Some(token),
            };
        }
        self.minutia()
    }
}

impl<'a> ProgramLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        ProgramLexer {
            len: s.len(),
            chars: s.char_indices().peekable(),
        }
        .collect()
    }
}
