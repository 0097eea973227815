//! Arithmetic calculator tool
//!
//! Recursive-descent evaluator over `f64`:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/' | '%') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom ('^' unary)?
//! atom  := number | '(' expr ')'
//! ```
//!
//! `×`, `x` between operands and `÷` are accepted as aliases.

use super::{str_param, ParamType, ParameterSchema, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Expression is nested too deeply")]
    TooDeep,
}

/// Nesting limit for parentheses, unary signs and exponent chains
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Num(value));
                continue;
            }
            '+' => tokens.push(Token::Plus),
            '-' | '−' => tokens.push(Token::Minus),
            '*' | '×' => tokens.push(Token::Star),
            'x' | 'X' if matches!(tokens.last(), Some(Token::Num(_)) | Some(Token::RParen)) => {
                tokens.push(Token::Star)
            }
            '/' | '÷' => tokens.push(Token::Slash),
            '%' => tokens.push(Token::Percent),
            '^' => tokens.push(Token::Caret),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ch => return Err(CalcError::UnexpectedChar { ch, pos: i }),
        }
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::Percent)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ if rhs == 0.0 => return Err(CalcError::DivisionByZero),
                Token::Slash => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    /// Every nesting level passes through here, so the depth is bounded once
    fn unary(&mut self) -> Result<f64, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(CalcError::UnbalancedParens),
                }
            }
            Some(Token::RParen) => Err(CalcError::UnbalancedParens),
            Some(_) | None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if parser.pos < parser.tokens.len() {
        return Err(match parser.tokens[parser.pos] {
            Token::RParen | Token::LParen => CalcError::UnbalancedParens,
            _ => CalcError::UnexpectedEnd,
        });
    }
    if !value.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(value)
}

/// Format a result without a trailing `.0` for whole numbers
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.10}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Tool that evaluates arithmetic expressions
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression with + - * / % ^ and parentheses."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().required(
            "expression",
            ParamType::String,
            "The arithmetic expression to evaluate, e.g. \"(12 + 8) * 3\"",
        )
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let expression = str_param(&params, "expression").unwrap_or_default();
        let value = evaluate(expression)?;
        Ok(ToolResult::success(format!(
            "{} = {}",
            expression,
            format_number(value)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn respects_precedence() {
        assert_eq!(evaluate("15 * 23").unwrap(), 345.0);
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("-2 ^ 2").unwrap(), -4.0);
        assert_eq!(evaluate("10 % 4").unwrap(), 2.0);
        assert_eq!(evaluate("7 x 6").unwrap(), 42.0);
        assert_eq!(evaluate("9 ÷ 3").unwrap(), 3.0);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("1 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(CalcError::UnbalancedParens));
        assert_eq!(evaluate("1 + 2)"), Err(CalcError::UnbalancedParens));
        assert_eq!(evaluate("1 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1.2.3"), Err(CalcError::InvalidNumber("1.2.3".into())));
        assert!(matches!(
            evaluate("two plus two"),
            Err(CalcError::UnexpectedChar { ch: 't', pos: 0 })
        ));
    }

    #[test]
    fn deep_nesting_is_an_error() {
        assert_eq!(evaluate(&"(".repeat(100_000)), Err(CalcError::TooDeep));
        let minus_run = format!("{}1", "-".repeat(100_000));
        assert_eq!(evaluate(&minus_run), Err(CalcError::TooDeep));
        let power_chain = format!("2{}", "^2".repeat(100_000));
        assert_eq!(evaluate(&power_chain), Err(CalcError::TooDeep));

        let nested = format!("{}1{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(evaluate(&nested), Ok(1.0));
    }

    #[test]
    fn formats_whole_and_fractional_results() {
        assert_eq!(format_number(345.0), "345");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
    }

    #[tokio::test]
    async fn tool_reports_expression_and_result() {
        let result = CalculatorTool::new()
            .execute(json!({ "expression": "15 * 23" }))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, "15 * 23 = 345");
    }

    #[tokio::test]
    async fn tool_fails_on_bad_expression() {
        let err = CalculatorTool::new()
            .execute(json!({ "expression": "15 * " }))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalcError>(),
            Some(&CalcError::UnexpectedEnd)
        );
    }
}
