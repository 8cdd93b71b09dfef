//! Recursive descent parser for salary formulas.
//!
//! Consumes the tokens produced by the lexer and builds a [`Formula`] tree:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := NUMBER | 'base_salary' | '(' expr ')' | '-' factor
//! ```

use crate::error::{EngineError, EngineResult};

use super::lexer::{BASE_SALARY_VARIABLE, Token, TokenKind, tokenize};

/// Maximum nesting of parentheses and unary minus accepted in one formula.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum number of tokens accepted in one formula.
///
/// Bounds the depth of left-leaning operator chains such as `1 + 1 + ... + 1`,
/// which the nesting limit does not see.
pub const MAX_FORMULA_TOKENS: usize = 1024;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Division.
    Divide,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A parsed salary formula.
///
/// Rendering a formula with `Display` produces canonical text that parses
/// back to the same tree.
///
/// # Example
///
/// ```
/// use payroll_engine::formula::parse;
///
/// let formula = parse("base_salary+(base_salary*0.2)-500").unwrap();
/// assert_eq!(formula.to_string(), "base_salary + (base_salary * 0.2) - 500");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A numeric literal.
    Literal {
        /// The literal value.
        value: f64,
    },
    /// The `base_salary` variable.
    Variable,
    /// Unary negation.
    Negate {
        /// The negated operand.
        operand: Box<Formula>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        left: Box<Formula>,
        /// The right operand.
        right: Box<Formula>,
    },
}

impl Formula {
    fn binary(op: BinaryOp, left: Formula, right: Formula) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns true if the formula references `base_salary` anywhere.
    pub fn references_base_salary(&self) -> bool {
        match self {
            Self::Literal { .. } => false,
            Self::Variable => true,
            Self::Negate { operand } => operand.references_base_salary(),
            Self::Binary { left, right, .. } => {
                left.references_base_salary() || right.references_base_salary()
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary {
                op: BinaryOp::Add | BinaryOp::Subtract,
                ..
            } => 1,
            Self::Binary { .. } => 2,
            Self::Negate { .. } => 3,
            Self::Literal { .. } | Self::Variable => 4,
        }
    }

    fn fmt_operand(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        min_precedence: u8,
    ) -> std::fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{}", value),
            Self::Variable => write!(f, "{}", BASE_SALARY_VARIABLE),
            Self::Negate { operand } => {
                write!(f, "-")?;
                operand.fmt_operand(f, 3)
            }
            Self::Binary { op, left, right } => {
                let own = self.precedence();
                left.fmt_operand(f, own)?;
                write!(f, " {} ", op.symbol())?;
                // Right operands bind one level tighter to keep left associativity.
                // Additive expressions that multiply are parenthesized for readability.
                let right_min = if own == 1 && right.precedence() == 2 {
                    5
                } else {
                    own + 1
                };
                right.fmt_operand(f, right_min)
            }
        }
    }
}

/// Parses formula text into a [`Formula`].
///
/// # Errors
///
/// Returns [`EngineError::Syntax`] if the text is empty, contains tokens
/// outside the grammar, has unbalanced parentheses or trailing input, or is
/// longer than [`MAX_FORMULA_TOKENS`].
pub fn parse(input: &str) -> EngineResult<Formula> {
    let tokens = tokenize(input)?;
    // tokenize appends Eof, which does not count towards the limit
    if tokens.len() > MAX_FORMULA_TOKENS + 1 {
        return Err(EngineError::Syntax {
            position: tokens[MAX_FORMULA_TOKENS].position,
            message: format!("formula is longer than {} tokens", MAX_FORMULA_TOKENS),
        });
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    if parser.peek().kind == TokenKind::Eof {
        return Err(EngineError::Syntax {
            position: 0,
            message: "formula is empty".to_string(),
        });
    }

    let formula = parser.parse_expr()?;
    let next = parser.peek();
    if next.kind != TokenKind::Eof {
        return Err(EngineError::Syntax {
            position: next.position,
            message: format!("unexpected {} after end of expression", next.kind),
        });
    }
    Ok(formula)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Token {
        // tokenize always ends with Eof and the parser never advances past it
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> EngineResult<Formula> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_term()?;
            left = Formula::binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> EngineResult<Formula> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Formula::binary(op, left, right);
        }
    }

    fn parse_factor(&mut self) -> EngineResult<Formula> {
        let token = self.advance();
        if matches!(token.kind, TokenKind::Minus | TokenKind::LeftParen) {
            self.depth += 1;
            if self.depth > MAX_NESTING_DEPTH {
                return Err(EngineError::Syntax {
                    position: token.position,
                    message: format!("formula nests deeper than {} levels", MAX_NESTING_DEPTH),
                });
            }
        }
        let factor = self.parse_nested_factor(token);
        if matches!(token.kind, TokenKind::Minus | TokenKind::LeftParen) {
            self.depth -= 1;
        }
        factor
    }

    fn parse_nested_factor(&mut self, token: Token) -> EngineResult<Formula> {
        match token.kind {
            TokenKind::Number(value) => Ok(Formula::Literal { value }),
            TokenKind::BaseSalary => Ok(Formula::Variable),
            TokenKind::Minus => {
                let operand = self.parse_factor()?;
                Ok(Formula::Negate {
                    operand: Box::new(operand),
                })
            }
            TokenKind::LeftParen => {
                let inner = self.parse_expr()?;
                let closing = self.advance();
                if closing.kind != TokenKind::RightParen {
                    return Err(EngineError::Syntax {
                        position: closing.position,
                        message: format!(
                            "expected ')' to close '(' at position {}, found {}",
                            token.position, closing.kind
                        ),
                    });
                }
                Ok(inner)
            }
            other => Err(EngineError::Syntax {
                position: token.position,
                message: format!(
                    "expected a number, '{}' or '(', found {}",
                    BASE_SALARY_VARIABLE, other
                ),
            }),
        }
    }
}
