//! Tokenizer for the expression language

use crate::error::{ExpressionError, ExpressionResult};

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    True,
    False,
    Null,
    OrOr,
    AndAnd,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
}

/// A token plus the byte offset it started at.
pub(crate) type Spanned = (Token, usize);

/// Tokenize `source` into a flat token list.
pub(crate) fn tokenize(source: &str) -> ExpressionResult<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => push_single(&mut chars, &mut tokens, Token::LParen, offset),
            ')' => push_single(&mut chars, &mut tokens, Token::RParen, offset),
            '[' => push_single(&mut chars, &mut tokens, Token::LBracket, offset),
            ']' => push_single(&mut chars, &mut tokens, Token::RBracket, offset),
            ',' => push_single(&mut chars, &mut tokens, Token::Comma, offset),
            '.' => push_single(&mut chars, &mut tokens, Token::Dot, offset),
            '+' => push_single(&mut chars, &mut tokens, Token::Plus, offset),
            '-' => push_single(&mut chars, &mut tokens, Token::Minus, offset),
            '*' => push_single(&mut chars, &mut tokens, Token::Star, offset),
            '/' => push_single(&mut chars, &mut tokens, Token::Slash, offset),
            '%' => push_single(&mut chars, &mut tokens, Token::Percent, offset),
            '!' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((Token::NotEq, offset));
                } else {
                    tokens.push((Token::Bang, offset));
                }
            }
            '=' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((Token::EqEq, offset));
                } else {
                    return Err(ExpressionError::parse(offset, "expected '=='"));
                }
            }
            '<' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((Token::Le, offset));
                } else {
                    tokens.push((Token::Lt, offset));
                }
            }
            '>' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((Token::Ge, offset));
                } else {
                    tokens.push((Token::Gt, offset));
                }
            }
            '&' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '&'))) {
                    chars.next();
                    tokens.push((Token::AndAnd, offset));
                } else {
                    return Err(ExpressionError::parse(offset, "expected '&&'"));
                }
            }
            '|' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '|'))) {
                    chars.next();
                    tokens.push((Token::OrOr, offset));
                } else {
                    return Err(ExpressionError::parse(offset, "expected '||'"));
                }
            }
            quote @ ('\'' | '"') => {
                chars.next();
                tokens.push((read_string(&mut chars, quote, offset)?, offset));
            }
            c if c.is_ascii_digit() => {
                tokens.push((read_number(source, &mut chars, offset)?, offset));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = offset;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &source[offset..end];
                let token = match word {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    _ => Token::Ident(word.to_owned()),
                };
                tokens.push((token, offset));
            }
            other => {
                return Err(ExpressionError::parse(
                    offset,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

fn push_single(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    tokens: &mut Vec<Spanned>,
    token: Token,
    offset: usize,
) {
    chars.next();
    tokens.push((token, offset));
}

fn read_string(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
    start: usize,
) -> ExpressionResult<Token> {
    let mut text = String::new();
    loop {
        match chars.next() {
            Some((_, c)) if c == quote => return Ok(Token::Str(text)),
            Some((offset, '\\')) => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, c @ ('\\' | '\'' | '"'))) => text.push(c),
                Some((i, other)) => {
                    return Err(ExpressionError::parse(
                        i,
                        format!("unsupported escape '\\{other}'"),
                    ));
                }
                None => return Err(ExpressionError::parse(offset, "unterminated string")),
            },
            Some((_, c)) => text.push(c),
            None => return Err(ExpressionError::parse(start, "unterminated string")),
        }
    }
}

fn read_number(
    source: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> ExpressionResult<Token> {
    let mut end = start;
    let mut is_float = false;
    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            end = i + 1;
            chars.next();
        } else if c == '.' && !is_float {
            // Only consume the dot when a digit follows; `1.name` is
            // property access on an integer literal, not a float.
            let mut ahead = chars.clone();
            ahead.next();
            if matches!(ahead.peek(), Some((_, d)) if d.is_ascii_digit()) {
                is_float = true;
                end = i + 1;
                chars.next();
            } else {
                break;
            }
        } else {
            break;
        }
    }
    let text = &source[start..end];
    if is_float {
        text.parse::<f64>()
            .map(Token::Float)
            .map_err(|_| ExpressionError::parse(start, format!("invalid number '{text}'")))
    } else {
        text.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| ExpressionError::parse(start, format!("invalid number '{text}'")))
    }
}
