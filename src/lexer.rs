use std::{iter::Peekable, str::CharIndices};

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// λ or \
    Lambda,
    /// .
    Dot,
    /// (
    LParen,
    /// )
    RParen,
    /// A single-letter variable name
    Name(char),
    /// A named constant, e.g. `Succ`
    Constant(String),
    /// A numeral literal
    Number(u64),
    /// End of input
    Eof,
}

pub struct Lexer<'input> {
    chars: Peekable<CharIndices<'input>>,
}

impl<'input> Lexer<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenizes the input. Whitespace is insignificant and discarded.
    ///
    /// # Errors
    /// Returns a [`ParseError`] on any character outside the grammar.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        while let Some(&(position, ch)) = self.chars.peek() {
            match ch {
                'λ' | '\\' => {
                    tokens.push(Token::Lambda);
                    self.chars.next();
                }
                '.' => {
                    tokens.push(Token::Dot);
                    self.chars.next();
                }
                '(' => {
                    tokens.push(Token::LParen);
                    self.chars.next();
                }
                ')' => {
                    tokens.push(Token::RParen);
                    self.chars.next();
                }
                'a'..='z' => {
                    tokens.push(Token::Name(ch));
                    self.chars.next();
                }
                'A'..='Z' => tokens.push(Token::Constant(self.read_constant())),
                '0'..='9' => tokens.push(Token::Number(self.read_number(position)?)),
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                _ => return Err(ParseError::UnexpectedCharacter { ch, position }),
            }
        }

        tokens.push(Token::Eof);
        Ok(tokens)
    }

    // Constant := [A-Z][A-Za-z]*
    fn read_constant(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_alphabetic() {
                name.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        name
    }

    fn read_number(&mut self, position: usize) -> Result<u64, ParseError> {
        let mut digits = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }

        digits.parse().map_err(|_| ParseError::InvalidNumber {
            text: digits,
            position,
        })
    }
}
