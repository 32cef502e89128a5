//! # Program Structure
//!
//! A program is the initial memory image: a finite sequence of words loaded
//! at addresses `0..len`. Its text form is the words in base 10 joined by
//! commas, e.g. `1,9,10,3,2,3,11,0,99,30,40,50`.

use crate::error::{Result, SpecError};
use crate::lexer::Token;
use logos::Logos;
use std::fmt;
use std::str::FromStr;

/// Initial memory image of an Intcode machine
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Program {
    words: Vec<i64>,
}

impl Program {
    /// Create a program from its words
    pub fn new(words: Vec<i64>) -> Self {
        Self { words }
    }

    /// Parse comma-separated program text
    pub fn parse(source: &str) -> Result<Self> {
        let mut lexer = Token::lexer(source);
        let mut words = Vec::new();
        let mut expect_number = true;

        while let Some(token) = lexer.next() {
            let offset = lexer.span().start;
            match token {
                Ok(Token::Number) if expect_number => {
                    let text = lexer.slice();
                    let value = text.parse::<i64>().map_err(|_| SpecError::NumberOutOfRange {
                        offset,
                        text: text.to_string(),
                    })?;
                    words.push(value);
                    expect_number = false;
                }
                Ok(Token::Number) => return Err(SpecError::ExpectedComma { offset }),
                Ok(Token::Comma) if expect_number => {
                    return Err(SpecError::UnexpectedComma { offset });
                }
                Ok(Token::Comma) => expect_number = true,
                Err(()) => {
                    return Err(SpecError::InvalidToken {
                        offset,
                        text: lexer.slice().to_string(),
                    });
                }
            }
        }

        Ok(Self { words })
    }

    /// Words of the program, starting at address 0
    #[inline]
    pub fn words(&self) -> &[i64] {
        &self.words
    }

    /// Number of words
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the program has no words
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Overwrite one word before the program runs.
    ///
    /// Addresses past the end extend the program with zeros.
    pub fn set(&mut self, address: usize, value: i64) {
        if address >= self.words.len() {
            self.words.resize(address + 1, 0);
        }
        self.words[address] = value;
    }

    /// Builder form of [`Program::set`]
    pub fn with_patch(mut self, address: usize, value: i64) -> Self {
        self.set(address, value);
        self
    }

    /// Consume the program and return its words
    pub fn into_words(self) -> Vec<i64> {
        self.words
    }
}

impl FromStr for Program {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self::new(words)
    }
}

impl From<&[i64]> for Program {
    fn from(words: &[i64]) -> Self {
        Self::new(words.to_vec())
    }
}

impl AsRef<[i64]> for Program {
    fn as_ref(&self) -> &[i64] {
        &self.words
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}
