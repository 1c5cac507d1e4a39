//! Arithmetic-only expression evaluator.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := unary (("*" | "/" | "%") unary)*
//! unary  := ("+" | "-") unary | power
//! power  := atom ("**" unary)?
//! atom   := NUMBER | "(" expr ")"
//! ```
//!
//! `**` is right-associative and binds tighter than a unary minus on its left,
//! so `-2 ** 2` is `-4` while `2 ** -1` is `0.5`.

use super::error::ToolError;
use super::{CALCULATOR, Tool, required_str};
use crate::domain::tool::{ParamKind, ParameterSpec, ToolDescriptor};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("empty expression")]
    Empty,
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

/// Numeric value with integer/float distinction, so `2 + 2` prints `4` and `4 / 2` prints `2.0`.
///
/// Integers are exact up to the `i128` range; past it arithmetic continues in `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(value) => value == 0,
            Number::Float(value) => value == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Float(value) => write_float(f, value),
        }
    }
}

/// Shortest round-trip digits; positional for decimal exponents in `-4..16`,
/// otherwise scientific with a signed two-digit exponent (`1e+17`, `1.5e-06`).
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        if value.fract() == 0.0 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(number) => write!(f, "{number}"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Percent => f.write_str("%"),
            Token::Pow => f.write_str("**"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let (number, next) = scan_number(&chars, i)?;
                tokens.push(Token::Num(number));
                i = next;
            }
            other => {
                return Err(CalcError::UnexpectedChar {
                    ch: other,
                    position: i,
                });
            }
        }
    }

    Ok(tokens)
}

/// Scan digits, an optional fraction and an optional exponent starting at `start`.
fn scan_number(chars: &[char], start: usize) -> Result<(Number, usize), CalcError> {
    let mut end = start;
    let mut is_float = false;

    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end < chars.len() && chars[end] == '.' {
        is_float = true;
        end += 1;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut probe = end + 1;
        if probe < chars.len() && matches!(chars[probe], '+' | '-') {
            probe += 1;
        }
        if probe < chars.len() && chars[probe].is_ascii_digit() {
            is_float = true;
            end = probe;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
        }
    }

    let literal: String = chars[start..end].iter().collect();
    let number = if is_float {
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| CalcError::InvalidNumber(literal.clone()))?
    } else {
        match literal.parse::<i128>() {
            Ok(value) => Number::Int(value),
            // Too large for i128: keep going as a float.
            Err(_) => literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| CalcError::InvalidNumber(literal.clone()))?,
        }
    };
    Ok((number, end))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Number, CalcError> {
        let mut left = self.term()?;
        while let Some(op) = self.peek() {
            let op = op.clone();
            match op {
                Token::Plus | Token::Minus => {
                    self.pos += 1;
                    let right = self.term()?;
                    left = apply(&op, left, right)?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Number, CalcError> {
        let mut left = self.unary()?;
        while let Some(op) = self.peek() {
            let op = op.clone();
            match op {
                Token::Star | Token::Slash | Token::Percent => {
                    self.pos += 1;
                    let right = self.unary()?;
                    left = apply(&op, left, right)?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Number, CalcError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                negate(self.unary()?)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Number, CalcError> {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Token::Pow)) {
            self.pos += 1;
            let exponent = self.unary()?;
            return pow(base, exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Number, CalcError> {
        match self.advance() {
            Some(Token::Num(number)) => Ok(number),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

fn negate(value: Number) -> Result<Number, CalcError> {
    Ok(match value {
        Number::Int(v) => v
            .checked_neg()
            .map(Number::Int)
            .unwrap_or(Number::Float(-(v as f64))),
        Number::Float(v) => Number::Float(-v),
    })
}

fn apply(op: &Token, left: Number, right: Number) -> Result<Number, CalcError> {
    match op {
        Token::Slash => {
            if right.is_zero() {
                return Err(CalcError::DivisionByZero);
            }
            finite(left.as_f64() / right.as_f64())
        }
        Token::Percent => {
            if right.is_zero() {
                return Err(CalcError::ModuloByZero);
            }
            match (left, right) {
                (Number::Int(a), Number::Int(b)) => match a.checked_rem(b) {
                    Some(r) if r != 0 && ((r < 0) != (b < 0)) => Ok(Number::Int(r + b)),
                    Some(r) => Ok(Number::Int(r)),
                    None => Ok(Number::Int(0)),
                },
                _ => {
                    let (a, b) = (left.as_f64(), right.as_f64());
                    let r = a % b;
                    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                        finite(r + b)
                    } else {
                        finite(r)
                    }
                }
            }
        }
        Token::Plus | Token::Minus | Token::Star => match (left, right) {
            (Number::Int(a), Number::Int(b)) => {
                let checked = match op {
                    Token::Plus => a.checked_add(b),
                    Token::Minus => a.checked_sub(b),
                    _ => a.checked_mul(b),
                };
                match checked {
                    Some(value) => Ok(Number::Int(value)),
                    None => float_op(op, a as f64, b as f64),
                }
            }
            _ => float_op(op, left.as_f64(), right.as_f64()),
        },
        other => Err(CalcError::UnexpectedToken(other.to_string())),
    }
}

fn float_op(op: &Token, a: f64, b: f64) -> Result<Number, CalcError> {
    match op {
        Token::Plus => finite(a + b),
        Token::Minus => finite(a - b),
        _ => finite(a * b),
    }
}

fn pow(base: Number, exponent: Number) -> Result<Number, CalcError> {
    match (base, exponent) {
        (Number::Int(b), Number::Int(e)) if e >= 0 => {
            let checked = u32::try_from(e).ok().and_then(|e| b.checked_pow(e));
            match checked {
                Some(value) => Ok(Number::Int(value)),
                None => finite((b as f64).powf(e as f64)),
            }
        }
        _ => {
            let (b, e) = (base.as_f64(), exponent.as_f64());
            if b == 0.0 && e < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            finite(b.powf(e))
        }
    }
}

fn finite(value: f64) -> Result<Number, CalcError> {
    if value.is_finite() {
        Ok(Number::Float(value))
    } else {
        Err(CalcError::NonFinite)
    }
}

/// Evaluate an arithmetic expression.
///
/// # Examples
///
/// ```
/// use stratus_core::tooling::calculator::evaluate;
///
/// assert_eq!(evaluate("5 * (3 + 2)").unwrap().to_string(), "25");
/// assert_eq!(evaluate("7 / 2").unwrap().to_string(), "3.5");
/// assert!(evaluate("2 +").is_err());
/// ```
pub fn evaluate(expression: &str) -> Result<Number, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    match parser.advance() {
        None => Ok(value),
        Some(extra) => Err(CalcError::UnexpectedToken(extra.to_string())),
    }
}

pub struct CalculatorTool {
    descriptor: ToolDescriptor,
}

impl CalculatorTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(CALCULATOR, "Evaluate a mathematical expression")
            .param(ParameterSpec::required(
                "expression",
                ParamKind::String,
                "The mathematical expression to evaluate, e.g., '2 + 2' or '5 * (3 + 2)'",
            ));
        Self { descriptor }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
        let expression = required_str(CALCULATOR, &arguments, "expression")?;
        let output = match evaluate(expression) {
            Ok(value) => value.to_string(),
            Err(err) => format!("Error: {err}"),
        };
        debug!(expression, output = output.as_str(), "Calculator evaluated expression");
        Ok(output)
    }
}
