//! Recursive-descent parser for the expression language
//!
//! Grammar, loosest-binding first:
//!
//! ```text
//! or        := and ( '||' and )*
//! and       := equality ( '&&' equality )*
//! equality  := comparison ( ( '==' | '!=' ) comparison )*
//! comparison:= additive ( ( '<' | '<=' | '>' | '>=' ) additive )*
//! additive  := multiplicative ( ( '+' | '-' ) multiplicative )*
//! multiplicative := unary ( ( '*' | '/' | '%' ) unary )*
//! unary     := ( '!' | '-' ) unary | postfix
//! postfix   := primary ( '.' IDENT | '[' or ']' )*
//! primary   := literal | IDENT | IDENT '(' args ')' | '(' or ')'
//! ```

use crate::ast::{BinaryOp, Expr};
use crate::error::{ExpressionError, ExpressionResult};
use crate::lexer::{Spanned, Token, tokenize};
use serde_json::Value;
use std::sync::Arc;

/// Parse an expression source string into an AST.
pub fn parse(source: &str) -> ExpressionResult<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        source_len: source.len(),
    };
    let expr = parser.parse_or()?;
    if let Some((token, offset)) = parser.peek_spanned() {
        return Err(ExpressionError::parse(
            offset,
            format!("unexpected trailing token {token:?}"),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    source_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_spanned(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.pos).map(|(t, o)| (t, *o))
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source_len, |(_, o)| *o)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> ExpressionResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(ExpressionError::parse(
                self.offset(),
                format!("expected {what}"),
            ))
        }
    }

    fn parse_or(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.parse_equality()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Equal,
                Some(Token::NotEq) => BinaryOp::NotEqual,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_comparison()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::LessThan,
                Some(Token::Le) => BinaryOp::LessEqual,
                Some(Token::Gt) => BinaryOp::GreaterThan,
                Some(Token::Ge) => BinaryOp::GreaterEqual,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ExpressionResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                Some(Token::Percent) => BinaryOp::Modulo,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ExpressionResult<Expr> {
        if self.eat(&Token::Bang) {
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        if self.eat(&Token::Minus) {
            return Ok(Expr::Negate(Box::new(self.parse_unary()?)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ExpressionResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&Token::Dot) {
                let offset = self.offset();
                match self.next() {
                    Some(Token::Ident(name)) => {
                        expr = Expr::Property {
                            object: Box::new(expr),
                            name: Arc::from(name.as_str()),
                        };
                    }
                    _ => {
                        return Err(ExpressionError::parse(offset, "expected property name"));
                    }
                }
            } else if self.eat(&Token::LBracket) {
                let index = self.parse_or()?;
                self.expect(&Token::RBracket, "']'")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> ExpressionResult<Expr> {
        let offset = self.offset();
        match self.next() {
            Some(Token::Int(i)) => Ok(Expr::Literal(Value::from(i))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Value::from(f))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::True) => Ok(Expr::Literal(Value::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Value::Bool(false))),
            Some(Token::Null) => Ok(Expr::Literal(Value::Null)),
            Some(Token::Ident(name)) => {
                if self.eat(&Token::LParen) {
                    let mut args = Vec::new();
                    if !self.eat(&Token::RParen) {
                        loop {
                            args.push(self.parse_or()?);
                            if self.eat(&Token::Comma) {
                                continue;
                            }
                            self.expect(&Token::RParen, "')'")?;
                            break;
                        }
                    }
                    Ok(Expr::Call {
                        name: Arc::from(name.as_str()),
                        args,
                    })
                } else {
                    Ok(Expr::Variable(Arc::from(name.as_str())))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_or()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(expr)
            }
            Some(other) => Err(ExpressionError::parse(
                offset,
                format!("unexpected token {other:?}"),
            )),
            None => Err(ExpressionError::parse(offset, "unexpected end of input")),
        }
    }
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}
