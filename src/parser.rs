use crate::error::{ExprError, LexError, ParseError};
use itertools::Itertools;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;
use std::str::FromStr;

// alternatives are tried left to right, so keywords must precede the generic symbol rule
lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(concat!(
        r"^(?:(?P<space>\s+)",
        r"|(?P<and>&|∧|\^|and\b)",
        r"|(?P<or>\+|∨|v\b|or\b)",
        r"|(?P<xor>#|⊕|xor\b)",
        r"|(?P<implies>->|→|impl\b)",
        r"|(?P<iff><->|=|≡|↔|iff\b)",
        r"|(?P<not>-|~|¬|not\b)",
        r"|(?P<join>,)",
        r"|(?P<symbol>[a-zA-Z]+\b)",
        r"|(?P<open>[(\[{])",
        r"|(?P<close>[)\]}]))",
    ))
    .expect("tokenizer pattern must compile");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprToken {
    Symbol(String),
    And,
    Or,
    Xor,
    Implies,
    Iff,
    Not,
    Join,
    OpenParen,
    CloseParen,
    Eof,
}

impl ExprToken {
    fn binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Self::And => Some(BinaryOperator::And),
            Self::Or => Some(BinaryOperator::Or),
            Self::Xor => Some(BinaryOperator::Xor),
            Self::Implies => Some(BinaryOperator::Implies),
            Self::Iff => Some(BinaryOperator::Iff),
            Self::Join => Some(BinaryOperator::Join),
            _ => None,
        }
    }
}

impl fmt::Display for ExprToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) => write!(f, "symbol '{}'", name),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Xor => write!(f, "XOR"),
            Self::Implies => write!(f, "IMPL"),
            Self::Iff => write!(f, "IFF"),
            Self::Not => write!(f, "NOT"),
            Self::Join => write!(f, "','"),
            Self::OpenParen => write!(f, "opening bracket"),
            Self::CloseParen => write!(f, "closing bracket"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: ExprToken,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
    Implies,
    Iff,
    /// The comma: a conjunction that is evaluated but never displayed as a column
    Join,
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter. All binary operators are left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Join => 1,
            Self::Iff => 2,
            Self::Implies => 3,
            Self::Or | Self::Xor => 4,
            Self::And => 5,
        }
    }

    /// Glyph used in canonical labels.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::And => "∧",
            Self::Or => "∨",
            Self::Xor => "⊕",
            Self::Implies => "→",
            Self::Iff => "≡",
            Self::Join => ",",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicExpr {
    Symbol(String),
    Not(Box<LogicExpr>),
    BinaryOp(BinaryOperator, Box<LogicExpr>, Box<LogicExpr>),
}

type TokenReader<'a> = Peekable<Iter<'a, SpannedToken>>;

/// Deepest nesting of brackets, negations and operators an expression may have.
///
/// Evaluation and dropping a [`LogicExpr`] recurse over the tree, so deeper input is
/// rejected with [`ParseError::TooDeep`] rather than exhausting the stack.
pub const MAX_DEPTH: usize = 256;

fn nest(depth: usize, position: usize) -> Result<usize, ParseError> {
    if depth >= MAX_DEPTH {
        Err(ParseError::TooDeep { position })
    } else {
        Ok(depth + 1)
    }
}

/// Parse `src` into an expression tree.
pub fn parse(src: &str) -> Result<LogicExpr, ExprError> {
    let tokens = tokenize(src)?;

    trace!(
        "tokens: {}",
        tokens.iter().map(|t| t.token.to_string()).join(" ")
    );

    Ok(LogicExpr::parse_tokens(&tokens)?)
}

/// Split `src` into tokens, terminated by a single [`ExprToken::Eof`].
pub fn tokenize(src: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut result = Vec::new();
    let mut position = 0;

    while position < src.len() {
        let rest = &src[position..];
        let unrecognized = || {
            // a letter run is only rejected because of the word character behind it
            let offset = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or_default();
            LexError {
                position: position + offset,
                found: rest[offset..].chars().next().unwrap_or_default(),
            }
        };

        let captures = TOKENIZER.captures(rest).ok_or_else(unrecognized)?;
        let length = captures.get(0).map_or(0, |m| m.len());

        if length == 0 {
            return Err(unrecognized());
        }

        let token = if captures.name("space").is_some() {
            None
        } else if captures.name("and").is_some() {
            Some(ExprToken::And)
        } else if captures.name("or").is_some() {
            Some(ExprToken::Or)
        } else if captures.name("xor").is_some() {
            Some(ExprToken::Xor)
        } else if captures.name("implies").is_some() {
            Some(ExprToken::Implies)
        } else if captures.name("iff").is_some() {
            Some(ExprToken::Iff)
        } else if captures.name("not").is_some() {
            Some(ExprToken::Not)
        } else if captures.name("join").is_some() {
            Some(ExprToken::Join)
        } else if let Some(symbol) = captures.name("symbol") {
            Some(ExprToken::Symbol(symbol.as_str().to_string()))
        } else if captures.name("open").is_some() {
            Some(ExprToken::OpenParen)
        } else if captures.name("close").is_some() {
            Some(ExprToken::CloseParen)
        } else {
            return Err(unrecognized());
        };

        if let Some(token) = token {
            result.push(SpannedToken { token, position });
        }

        position += length;
    }

    result.push(SpannedToken {
        token: ExprToken::Eof,
        position: src.len(),
    });

    Ok(result)
}

impl LogicExpr {
    pub fn parse_tokens(tokens: &[SpannedToken]) -> Result<Self, ParseError> {
        let mut reader = tokens.iter().peekable();

        if matches!(
            reader.peek().map(|t| &t.token),
            None | Some(ExprToken::Eof)
        ) {
            return Err(ParseError::EmptyExpression);
        }

        let (result, _) = Self::parse_sub_formula(&mut reader, 0, 0)?;

        match reader.next() {
            None
            | Some(SpannedToken {
                token: ExprToken::Eof,
                ..
            }) => Ok(result),
            Some(SpannedToken {
                token: ExprToken::CloseParen,
                position,
            }) => Err(ParseError::UnmatchedParen {
                position: *position,
            }),
            Some(SpannedToken { token, position }) => Err(ParseError::TrailingInput {
                position: *position,
                found: token.to_string(),
            }),
        }
    }

    // Each parsed subtree comes with its height, leaves being zero. `depth` counts the
    // brackets and negations that enclose the current operand.
    fn parse_sub_formula(
        tokens: &mut TokenReader,
        min_precedence: u8,
        depth: usize,
    ) -> Result<(Self, usize), ParseError> {
        let (mut left, mut height) = Self::parse_operand(tokens, depth)?;

        while let Some(next) = tokens.peek() {
            let Some(op) = next.token.binary_operator() else {
                break;
            };
            if op.precedence() < min_precedence {
                break;
            }

            let position = next.position;
            tokens.next();
            let (right, right_height) = Self::parse_sub_formula(tokens, op.precedence() + 1, depth)?;
            height = nest(height.max(right_height), position)?;
            left = Self::BinaryOp(op, Box::new(left), Box::new(right));
        }

        Ok((left, height))
    }

    fn parse_operand(tokens: &mut TokenReader, depth: usize) -> Result<(Self, usize), ParseError> {
        match tokens.next() {
            Some(SpannedToken {
                token: ExprToken::Symbol(name),
                ..
            }) => Ok((Self::Symbol(name.clone()), 0)),
            Some(SpannedToken {
                token: ExprToken::Not,
                position,
            }) => {
                let (operand, height) = Self::parse_operand(tokens, nest(depth, *position)?)?;
                Ok((Self::Not(Box::new(operand)), nest(height, *position)?))
            }
            Some(SpannedToken {
                token: ExprToken::OpenParen,
                position,
            }) => Self::parse_parenthesized(tokens, *position, nest(depth, *position)?),
            None
            | Some(SpannedToken {
                token: ExprToken::Eof,
                ..
            }) => Err(ParseError::UnexpectedEof {
                expected: "an operand",
            }),
            Some(SpannedToken { token, position }) => Err(ParseError::UnexpectedToken {
                position: *position,
                found: token.to_string(),
                expected: "an operand",
            }),
        }
    }

    fn parse_parenthesized(
        tokens: &mut TokenReader,
        open: usize,
        depth: usize,
    ) -> Result<(Self, usize), ParseError> {
        let subform = Self::parse_sub_formula(tokens, 0, depth)?;

        match tokens.next() {
            Some(SpannedToken {
                token: ExprToken::CloseParen,
                ..
            }) => Ok(subform),
            None
            | Some(SpannedToken {
                token: ExprToken::Eof,
                ..
            }) => Err(ParseError::UnmatchedParen { position: open }),
            Some(SpannedToken { token, position }) => Err(ParseError::UnexpectedToken {
                position: *position,
                found: token.to_string(),
                expected: "a closing bracket",
            }),
        }
    }

    /// Distinct variable names in order of first appearance in the source.
    pub fn symbols(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_symbols(&mut leaves);
        leaves.into_iter().unique().collect()
    }

    fn collect_symbols<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        match self {
            Self::Symbol(name) => leaves.push(name),
            Self::Not(f) => f.collect_symbols(leaves),
            Self::BinaryOp(_, l, r) => {
                l.collect_symbols(leaves);
                r.collect_symbols(leaves);
            }
        }
    }
}

impl FromStr for LogicExpr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
