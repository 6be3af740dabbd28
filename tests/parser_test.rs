use pretty_assertions::assert_eq;

use rstruth::parser::*;
use rstruth::{ExprError, LexError, ParseError};

#[test]
fn test_basic_tokens() -> Result<(), LexError> {
    let test_strs: Vec<&str> = vec![
        "a",
        "a & b",
        "alpha + beta",
        "(alpha & beta )",
        "( alpha ∧ beta)",
        "  a ",
        "a  &b",
        "a+b",
        "a v b",
        "a+b+c",
        "(a&b)+c",
        "(a)and(b)",
        "mand",
        "m and",
        "a -> b <-> c",
        "¬a ⊕ {b → c}",
        "a, b, [c]",
    ];

    for test_str in test_strs {
        dbg!(test_str);
        let tokens = dbg!(tokenize(test_str)?);
        assert_eq!(tokens.last().map(|t| &t.token), Some(&ExprToken::Eof));
    }

    Ok(())
}

#[test]
fn test_parser() -> Result<(), ExprError> {
    let test_strs: Vec<&str> = vec![
        "a",
        "a & b",
        "alpha + beta",
        "(alpha & beta )",
        "( alpha & beta)",
        "  a ",
        "a  &b",
        "a+b",
        "a + b",
        "a+b+c",
        "(a&b)+c",
        "(a)and(b)",
        "mand",
        "a+a+a",
        "not not a",
        "a impl b iff c",
        "a xor b or c and d",
    ];

    for test_str in test_strs {
        dbg!(test_str);
        let result = parse(test_str)?;
        dbg!(&result);
    }

    Ok(())
}

#[test]
fn test_spellings_are_interchangeable() -> Result<(), ExprError> {
    let ascii = parse("-(a & b) + (c # d) -> (e <-> f), g")?;
    let unicode = parse("¬(a ∧ b) ∨ (c ⊕ d) → (e ≡ f), g")?;
    let words = parse("not (a and b) or (c xor d) impl (e iff f), g")?;
    let mixed = parse("~[a ^ b] v {c # d} -> (e = f) , g")?;

    assert_eq!(ascii, unicode);
    assert_eq!(ascii, words);
    assert_eq!(ascii, mixed);

    Ok(())
}

#[test]
fn test_parse_is_deterministic() -> Result<(), ExprError> {
    let src = "(p -> q) & (q -> r) -> (p -> r)";

    assert_eq!(parse(src)?, parse(src)?);
    assert_eq!(src.parse::<LogicExpr>()?, parse(src)?);

    Ok(())
}

#[test]
fn test_lex_errors() {
    assert_eq!(
        parse("a % b"),
        Err(ExprError::Lex(LexError {
            position: 2,
            found: '%'
        }))
    );
    assert!(matches!(parse("a | b"), Err(ExprError::Lex(_))));
    assert_eq!(
        parse("x1 & x2"),
        Err(ExprError::Lex(LexError {
            position: 1,
            found: '1'
        }))
    );
    assert_eq!(
        parse("a & b2c"),
        Err(ExprError::Lex(LexError {
            position: 5,
            found: '2'
        }))
    );
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse("a &"),
        Err(ExprError::Parse(ParseError::UnexpectedEof { .. }))
    ));
    assert!(matches!(
        parse(""),
        Err(ExprError::Parse(ParseError::EmptyExpression))
    ));
    assert!(matches!(
        parse("((a)"),
        Err(ExprError::Parse(ParseError::UnmatchedParen { position: 0 }))
    ));
    assert!(matches!(
        parse("a)"),
        Err(ExprError::Parse(ParseError::UnmatchedParen { position: 1 }))
    ));
    assert!(matches!(
        parse("a b"),
        Err(ExprError::Parse(ParseError::TrailingInput { .. }))
    ));
    assert!(matches!(
        parse("a & , b"),
        Err(ExprError::Parse(ParseError::UnexpectedToken { position: 4, .. }))
    ));
    assert!(matches!(
        parse("()"),
        Err(ExprError::Parse(ParseError::UnexpectedToken { .. }))
    ));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let brackets = format!("{}a{}", "(".repeat(5000), ")".repeat(5000));
    assert!(matches!(
        parse(&brackets),
        Err(ExprError::Parse(ParseError::TooDeep { .. }))
    ));

    let negations = format!("{}a", "~".repeat(5000));
    assert!(matches!(
        parse(&negations),
        Err(ExprError::Parse(ParseError::TooDeep { .. }))
    ));

    let conjunctions = format!("a{}", " & a".repeat(5000));
    assert!(matches!(
        parse(&conjunctions),
        Err(ExprError::Parse(ParseError::TooDeep { .. }))
    ));
}

#[test]
fn test_error_messages() {
    let message = |src: &str| parse(src).err().map(|e| e.to_string());

    assert_eq!(
        message("a % b"),
        Some("lexical error: unrecognized character '%' at position 2".to_string())
    );
    assert_eq!(
        message("a &"),
        Some("syntax error: unexpected end of input, expected an operand".to_string())
    );
    assert_eq!(
        message("a b"),
        Some("syntax error: trailing input starting with symbol 'b' at position 2".to_string())
    );
    assert_eq!(
        message("a1"),
        Some("lexical error: unrecognized character '1' at position 1".to_string())
    );
    assert_eq!(
        message(&format!("{}a", "-".repeat(MAX_DEPTH + 1))),
        Some(format!(
            "syntax error: expression nested too deeply at position {}",
            MAX_DEPTH
        ))
    );
}
