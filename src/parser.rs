use thiserror::Error;

use crate::{
    lexer::{Lexer, Token},
    term::{Name, Term, constant, numeral},
};

/// Errors reported synchronously at parse time. No partial term is ever
/// returned alongside one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("expected {expected} but found {found:?} at token {position}")]
    UnexpectedToken {
        expected: String,
        found: Token,
        position: usize,
    },
    #[error("unknown constant '{name}'")]
    UnknownConstant { name: String },
    #[error("invalid numeral '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Parses a lambda calculus term from its surface syntax.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the input cannot be tokenized or parsed,
    /// or if it references an unknown constant.
    pub fn parse(input: &str) -> Result<Term<Name>, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Self {
            tokens,
            position: 0,
        };
        let term = parser.parse_term()?;
        parser.expect(&Token::Eof, "end of input")?;
        Ok(term)
    }

    // Term := Application | Abstraction
    fn parse_term(&mut self) -> Result<Term<Name>, ParseError> {
        if matches!(self.peek(), Token::Lambda) {
            self.parse_abstraction()
        } else {
            self.parse_application()
        }
    }

    // Abstraction := '\' Name+ '.' Term
    //
    // Multi-letter heads desugar right-associatively before anything else:
    // \xy.B == \x.\y.B
    fn parse_abstraction(&mut self) -> Result<Term<Name>, ParseError> {
        self.expect(&Token::Lambda, "'\\'")?;

        let mut binders = Vec::new();
        while let Token::Name(name) = self.peek() {
            binders.push(*name);
            self.advance();
        }
        if binders.is_empty() {
            return Err(self.unexpected("binder"));
        }

        self.expect(&Token::Dot, "'.'")?;
        let mut term = self.parse_term()?;
        for binder in binders.into_iter().rev() {
            term = Term::abs(binder, term);
        }
        Ok(term)
    }

    // Application := Atom+, left-associative: a b c == (a b) c
    fn parse_application(&mut self) -> Result<Term<Name>, ParseError> {
        let mut term = self.parse_atom()?;
        while matches!(
            self.peek(),
            Token::LParen | Token::Name(_) | Token::Lambda | Token::Constant(_) | Token::Number(_)
        ) {
            let argument = self.parse_atom()?;
            term = Term::app(term, argument);
        }
        Ok(term)
    }

    // Atom := '(' Term ')' | Name | Abstraction | Constant
    fn parse_atom(&mut self) -> Result<Term<Name>, ParseError> {
        match self.peek() {
            Token::LParen => {
                self.advance();
                let term = self.parse_term()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(term)
            }
            Token::Name(name) => {
                let term = Term::var(*name);
                self.advance();
                Ok(term)
            }
            Token::Lambda => self.parse_abstraction(),
            Token::Constant(name) => {
                let term = constant(name).ok_or_else(|| ParseError::UnknownConstant {
                    name: name.clone(),
                })?;
                self.advance();
                Ok(term)
            }
            Token::Number(n) => {
                let term = numeral(*n);
                self.advance();
                Ok(term)
            }
            _ => Err(self.unexpected("a term")),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, token: &Token, expected: &str) -> Result<(), ParseError> {
        if self.peek() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().clone(),
            position: self.position,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::term::succ;

    fn parse(input: &str) -> Term<Name> {
        Parser::parse(input).unwrap()
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse("x"), Term::var('x'));
    }

    #[test]
    fn test_parse_identity() {
        assert_eq!(parse("\\x.x"), Term::abs('x', Term::var('x')));
        assert_eq!(parse("λx.x"), Term::abs('x', Term::var('x')));
    }

    #[test]
    fn test_multi_letter_head_desugars_right_assoc() {
        // \xy.xy == \x.(\y.xy)
        let expected = Term::abs(
            'x',
            Term::abs('y', Term::app(Term::var('x'), Term::var('y'))),
        );
        assert_eq!(parse("\\xy.xy"), expected);
        assert_eq!(parse("\\x.\\y.xy"), expected);
    }

    #[test]
    fn test_application_is_left_associative() {
        // abc == (ab)c
        let expected = Term::app(
            Term::app(Term::var('a'), Term::var('b')),
            Term::var('c'),
        );
        assert_eq!(parse("abc"), expected);
        assert_eq!(parse("a b c"), expected);
        assert_eq!(parse("(ab)c"), expected);
    }

    #[test]
    fn test_abstraction_body_extends_right() {
        // \x.xz\y.xy == \x.((xz)(\y.xy))
        let printed = parse("\\x.xz\\y.xy").to_string();
        assert_eq!(printed, "\\x.(xz)(\\y.xy)");
    }

    #[test]
    fn test_parentheses_group() {
        let expected = Term::app(Term::var('a'), Term::app(Term::var('b'), Term::var('c')));
        assert_eq!(parse("a(bc)"), expected);
    }

    #[test]
    fn test_whitespace_insignificant() {
        assert_eq!(parse("  \\ x .  x  "), parse("\\x.x"));
    }

    #[test]
    fn test_numeral_literal() {
        assert_eq!(parse("0"), crate::term::numeral(0));
        assert_eq!(parse("2"), crate::term::numeral(2));
        assert_eq!(parse("2").to_string(), "\\s.\\z.s(sz)");
    }

    #[test]
    fn test_constant_resolution() {
        assert_eq!(parse("Succ"), succ());
        assert_eq!(
            parse("Succ 0"),
            Term::app(succ(), crate::term::numeral(0))
        );
    }

    #[test]
    fn test_unknown_constant() {
        let result = Parser::parse("Mul 2 2");
        assert_eq!(
            result,
            Err(ParseError::UnknownConstant {
                name: "Mul".to_string()
            })
        );
    }

    #[test]
    fn test_missing_dot() {
        let result = Parser::parse("\\x x");
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_missing_binder() {
        let result = Parser::parse("\\.x");
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_unmatched_parentheses() {
        assert!(Parser::parse("(\\x.x").is_err());
        assert!(Parser::parse("\\x.x)").is_err());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(Parser::parse("").is_err());
        assert!(Parser::parse("   ").is_err());
    }

    #[test]
    fn test_bad_character() {
        assert!(matches!(
            Parser::parse("x ? y"),
            Err(ParseError::UnexpectedCharacter { ch: '?', .. })
        ));
    }

    #[test]
    fn test_abstraction_as_application_argument() {
        // y(\x.x) applies y to the abstraction
        let expected = Term::app(Term::var('y'), Term::abs('x', Term::var('x')));
        assert_eq!(parse("y(\\x.x)"), expected);
    }
}
