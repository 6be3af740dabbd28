//! Errors raised while turning source text into a [`LogicExpr`](crate::parser::LogicExpr).
//!
//! Lexing and parsing are the only fallible steps: once an expression has been parsed,
//! evaluation and enumeration are total.

use std::error::Error;
use std::fmt;

/// A character sequence that matches none of the lexer rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte offset of the offending character in the source text
    pub position: usize,
    /// The offending character
    pub found: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized character {:?} at position {}",
            self.found, self.position
        )
    }
}

impl Error for LexError {}

/// A token sequence that does not match the expression grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token appeared where the grammar does not allow it
    UnexpectedToken {
        /// Byte offset of the token
        position: usize,
        /// Textual rendering of the token that was found
        found: String,
        /// What the parser was looking for
        expected: &'static str,
    },
    /// The input ended in the middle of an expression
    UnexpectedEof {
        /// What the parser was looking for
        expected: &'static str,
    },
    /// An opening bracket that is never closed, or a closing bracket without an opener
    UnmatchedParen {
        /// Byte offset of the unmatched bracket
        position: usize,
    },
    /// A complete expression was followed by more tokens
    TrailingInput {
        /// Byte offset of the first trailing token
        position: usize,
        /// Textual rendering of the first trailing token
        found: String,
    },
    /// The input contains no tokens at all
    EmptyExpression,
    /// Brackets, negations or operators nest deeper than [`MAX_DEPTH`](crate::parser::MAX_DEPTH)
    TooDeep {
        /// Byte offset of the token that exceeded the limit
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "unexpected {} at position {}, expected {}",
                found, position, expected
            ),
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            Self::UnmatchedParen { position } => {
                write!(f, "unmatched bracket at position {}", position)
            }
            Self::TrailingInput { position, found } => write!(
                f,
                "trailing input starting with {} at position {}",
                found, position
            ),
            Self::EmptyExpression => write!(f, "empty expression"),
            Self::TooDeep { position } => {
                write!(f, "expression nested too deeply at position {}", position)
            }
        }
    }
}

impl Error for ParseError {}

/// Any failure of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "lexical error: {}", e),
            Self::Parse(e) => write!(f, "syntax error: {}", e),
        }
    }
}

impl Error for ExprError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for ExprError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for ExprError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
