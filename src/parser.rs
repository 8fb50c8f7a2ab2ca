use smol_str::SmolStr;

use crate::ast::{Document, Node, TopItem};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::{Error, Result};

/// Tokenizes and parses a full document. One token of lookahead, no
/// backtracking; the token stream always ends with `Eof`.
pub fn parse(input: &str) -> Result<Document> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse_document()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> Error {
        let token = self.peek();
        Error::syntax(
            format!("expected {expected}, found {}", token.kind.describe()),
            token.location,
        )
    }

    fn expect_name(&mut self, context: &str) -> Result<SmolStr> {
        match &self.peek().kind {
            TokenKind::Name(_) => {
                let token = self.bump();
                match token.kind {
                    TokenKind::Name(name) => Ok(name),
                    _ => unreachable!("peeked a name"),
                }
            }
            _ => Err(self.unexpected(context)),
        }
    }

    fn parse_document(&mut self) -> Result<Document> {
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Var => items.push(self.parse_const_decl()?),
                TokenKind::LBracket => items.push(TopItem::Value(self.parse_dict()?)),
                TokenKind::LBrace => items.push(TopItem::Value(self.parse_array()?)),
                _ => return Err(self.unexpected("'var', '[' or '{' at top level")),
            }
        }
        Ok(Document { items })
    }

    fn parse_const_decl(&mut self) -> Result<TopItem> {
        self.bump();
        let name = self.expect_name("a constant name after 'var'")?;
        let value = self.parse_value()?;
        Ok(TopItem::ConstDecl { name, value })
    }

    fn parse_dict(&mut self) -> Result<Node> {
        self.bump();
        let mut pairs = Vec::new();
        if self.peek().kind != TokenKind::RBracket {
            loop {
                let key = self.expect_name("a dictionary key")?;
                if self.peek().kind != TokenKind::Colon {
                    return Err(self.unexpected("':' after dictionary key"));
                }
                self.bump();
                let value = self.parse_value()?;
                pairs.push((key, value));
                if self.peek().kind != TokenKind::Comma {
                    break;
                }
                self.bump();
            }
        }
        if self.peek().kind != TokenKind::RBracket {
            return Err(self.unexpected("',' or ']' in dictionary"));
        }
        self.bump();
        Ok(Node::Dict(pairs))
    }

    fn parse_array(&mut self) -> Result<Node> {
        self.bump();
        let mut items = Vec::new();
        if self.peek().kind != TokenKind::RBrace {
            loop {
                items.push(self.parse_value()?);
                if self.peek().kind != TokenKind::Dot {
                    break;
                }
                self.bump();
            }
        }
        if self.peek().kind != TokenKind::RBrace {
            return Err(self.unexpected("'.' or '}' in array"));
        }
        self.bump();
        Ok(Node::Array(items))
    }

    fn parse_value(&mut self) -> Result<Node> {
        match &self.peek().kind {
            TokenKind::Number(_) | TokenKind::Str(_) => {
                let token = self.bump();
                match token.kind {
                    TokenKind::Number(value) => Ok(Node::Number(value)),
                    TokenKind::Str(value) => Ok(Node::String(value)),
                    _ => unreachable!("peeked a scalar"),
                }
            }
            TokenKind::LBrace => self.parse_array(),
            TokenKind::LBracket => self.parse_dict(),
            TokenKind::Dollar => self.parse_const_ref(),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn parse_const_ref(&mut self) -> Result<Node> {
        let dollar = self.bump();
        let name = self.expect_name("a constant name after '$'")?;
        if self.peek().kind != TokenKind::Dollar {
            return Err(self.unexpected("'$' closing the constant reference"));
        }
        self.bump();
        Ok(Node::ConstRef {
            name,
            location: dollar.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn dict_with_scalars() {
        let document = parse("[name: q(John), age: 25.5]").unwrap();
        assert_eq!(
            document.items,
            vec![TopItem::Value(Node::Dict(vec![
                (SmolStr::new("name"), Node::String("John".to_string())),
                (SmolStr::new("age"), Node::Number(25.5)),
            ]))]
        );
    }

    #[test]
    fn array_items_are_dot_separated() {
        let document = parse("{ 1.5. 2.5 }").unwrap();
        assert_eq!(
            document.items,
            vec![TopItem::Value(Node::Array(vec![
                Node::Number(1.5),
                Node::Number(2.5),
            ]))]
        );
    }

    #[test]
    fn const_decl_and_ref() {
        let document = parse("var PORT 8080.0 [port: $PORT$]").unwrap();
        assert_eq!(document.items.len(), 2);
        assert!(matches!(
            document.items[0],
            TopItem::ConstDecl { ref name, .. } if name == "PORT"
        ));
    }

    #[rstest]
    #[case("{ 1.5, 2.5 }", "expected '.' or '}'")]
    #[case("[name q(John)]", "expected ':'")]
    #[case("[name: q(John)", "expected ',' or ']'")]
    #[case("{ 1.5. 2.5", "expected '.' or '}'")]
    #[case("var x $PORT", "expected '$'")]
    #[case("1.5", "expected 'var', '[' or '{'")]
    #[case("[a: 1.0] ]", "expected 'var', '[' or '{'")]
    #[case("var x", "expected a value")]
    fn rejects_malformed_input(#[case] input: &str, #[case] fragment: &str) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Syntax);
        assert!(
            err.message.contains(fragment),
            "message {:?} missing {:?}",
            err.message,
            fragment
        );
    }

    #[test]
    fn reports_the_offending_location() {
        let err = parse("[\n  a: 1\n]").unwrap_err();
        let location = err.location.unwrap();
        assert_eq!(location.line, 2);
        assert_eq!(location.column, 6);
    }
}
