use memchr::memchr;
use memchr::memmem;
use smol_str::SmolStr;

use crate::{Error, Location, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Var,
    Name(SmolStr),
    Number(f64),
    Str(String),
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Dot,
    Dollar,
    Eof,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Var => "'var'".to_string(),
            TokenKind::Name(name) => format!("name '{name}'"),
            TokenKind::Number(_) => "number".to_string(),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Dollar => "'$'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                break;
            }
        }
        let location = self.location();
        let Some(ch) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                location,
            });
        };
        let kind = match ch {
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '.' => self.single(TokenKind::Dot),
            '$' => self.single(TokenKind::Dollar),
            '+' | '-' | '0'..='9' => self.lex_number(location)?,
            'q' if self.peek_second() == Some('(') => self.lex_string(location)?,
            'a'..='z' | 'A'..='Z' => self.lex_name(),
            other => {
                return Err(Error::syntax(
                    format!("unexpected character '{other}'"),
                    location,
                ))
            }
        };
        Ok(Token { kind, location })
    }

    fn location(&self) -> Location {
        Location {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance_to(self.pos + 1);
        kind
    }

    fn advance_to(&mut self, end: usize) {
        for ch in self.input[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .find(|ch: char| !matches!(ch, ' ' | '\t' | '\r' | '\n'))
            .unwrap_or(self.rest().len());
        self.advance_to(self.pos + skipped);
    }

    fn skip_comment(&mut self) -> Result<bool> {
        if !self.rest().starts_with("/*") {
            return Ok(false);
        }
        let location = self.location();
        let body_start = self.pos + 2;
        match memmem::find(self.input[body_start..].as_bytes(), b"*/") {
            Some(idx) => {
                self.advance_to(body_start + idx + 2);
                Ok(true)
            }
            None => Err(Error::syntax("unterminated comment", location)),
        }
    }

    fn lex_name(&mut self) -> TokenKind {
        let len = self
            .rest()
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(self.rest().len());
        let text = &self.input[self.pos..self.pos + len];
        self.advance_to(self.pos + len);
        if text == "var" {
            TokenKind::Var
        } else {
            TokenKind::Name(SmolStr::new(text))
        }
    }

    // NUMBER is sign? digits '.' digits; a decimal point is mandatory.
    fn lex_number(&mut self, location: Location) -> Result<TokenKind> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance_to(self.pos + 1);
        }
        self.eat_digits("expected digits in number", location)?;
        if self.peek() != Some('.') {
            return Err(Error::syntax(
                "number is missing a decimal point",
                location,
            ));
        }
        self.advance_to(self.pos + 1);
        self.eat_digits("expected digits after decimal point", location)?;
        let text = &self.input[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| Error::syntax(format!("invalid number '{text}'"), location))?;
        if !value.is_finite() {
            return Err(Error::syntax(
                format!("number '{text}' is out of range"),
                location,
            ));
        }
        Ok(TokenKind::Number(value))
    }

    fn eat_digits(&mut self, message: &str, location: Location) -> Result<()> {
        let len = self
            .rest()
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(Error::syntax(message, location));
        }
        self.advance_to(self.pos + len);
        Ok(())
    }

    // STRING is q( ... ): everything up to the first ')' is raw content,
    // with no escape mechanism for ')'.
    fn lex_string(&mut self, location: Location) -> Result<TokenKind> {
        let body_start = self.pos + 2;
        match memchr(b')', self.input[body_start..].as_bytes()) {
            Some(idx) => {
                let content = self.input[body_start..body_start + idx].to_string();
                self.advance_to(body_start + idx + 1);
                Ok(TokenKind::Str(content))
            }
            None => Err(Error::syntax("unterminated string", location)),
        }
    }
}
