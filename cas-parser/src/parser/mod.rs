pub mod ast;
pub mod error;
pub mod token;

use cas_error::ErrorKind;
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The deepest nesting of sub-expressions the parser accepts. Every later stage walks the tree
/// recursively, so the limit also bounds their stack usage.
pub const MAX_DEPTH: usize = 128;

/// A high-level parser for mathematical expressions. This is the type to use to parse an
/// arbitrary piece of user input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many sub-expressions enclose the one currently being parsed.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token, which may be whitespace. The cursor is not moved. Returns
    /// [`None`] if the cursor is at the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns true if the current token is whitespace, i.e. the next token is not directly
    /// adjacent to the previous one.
    pub fn at_whitespace(&self) -> bool {
        self.current_token().map_or(false, Token::is_whitespace)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Parses a nested sub-expression with the given function, one level deeper than the current
    /// expression. Returns an error instead if that would exceed [`MAX_DEPTH`].
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(kind::TooDeeplyNested));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let mut compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a comma.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            if self.peek_kind() == Some(TokenKind::Comma) {
                // consume the comma; the value after it is mandatory
                self.next_token()?;
            } else {
                return Ok(values);
            }
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (trailing whitespace aside); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_kind().is_none() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication shares this precedence.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        list::List,
        literal::{LitFloat, LitInt, LitSym, Literal},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse("  x  "), sym("x", 2..3));
    }

    #[test]
    fn precedence_of_terms_and_factors() {
        // 1 + 2 * 3 = 1 + (2 * 3)
        assert_eq!(parse("1 + 2 * 3"), bin(
            int("1", 0..1),
            BinOpKind::Add,
            false,
            2..3,
            bin(int("2", 4..5), BinOpKind::Mul, false, 6..7, int("3", 8..9)),
        ));
    }

    #[test]
    fn implicit_multiplication_binds_to_power() {
        // 5x^2 = 5 * (x^2)
        assert_eq!(parse("5x^2"), bin(
            int("5", 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, int("2", 3..4)),
        ));
    }

    #[test]
    fn implicit_multiplication_of_parens() {
        let expr = parse("(x+2)(x+3)");
        let Expr::Binary(binary) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(binary.op.implicit);
        assert!(matches!(*binary.lhs, Expr::Paren(_)));
        assert!(matches!(*binary.rhs, Expr::Paren(_)));
    }

    #[test]
    fn implicit_multiplication_needs_adjacency() {
        assert!(Parser::new("hello world").try_parse_full::<Expr>().is_err());
        assert!(Parser::new("2 x").try_parse_full::<Expr>().is_err());
        assert!(Parser::new("2x").try_parse_full::<Expr>().is_ok());
    }

    #[test]
    fn power_is_right_associative() {
        // 2^3^2 = 2^(3^2)
        assert_eq!(parse("2^3^2"), bin(
            int("2", 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            bin(int("3", 2..3), BinOpKind::Exp, false, 3..4, int("2", 4..5)),
        ));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        // -x^2 = -(x^2)
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, int("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(parse("2^-1"), bin(
            int("2", 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            Expr::Unary(Unary {
                operand: Box::new(int("1", 3..4)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                span: 2..4,
            }),
        ));
    }

    #[test]
    fn function_call() {
        assert_eq!(parse("sin(x)"), Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![sym("x", 4..5)],
            span: 0..6,
            paren_span: 3..6,
        }));
    }

    #[test]
    fn parenthesized() {
        assert_eq!(parse("(x)"), Expr::Paren(Paren {
            expr: Box::new(sym("x", 1..2)),
            span: 0..3,
        }));
    }

    #[test]
    fn nested_list() {
        assert_eq!(parse("[[1,2],[3,4]]"), Expr::List(List {
            values: vec![
                Expr::List(List { values: vec![int("1", 2..3), int("2", 4..5)], span: 1..6 }),
                Expr::List(List { values: vec![int("3", 8..9), int("4", 10..11)], span: 7..12 }),
            ],
            span: 0..13,
        }));
    }

    #[test]
    fn equals_sign_is_not_an_expression() {
        assert!(Parser::new("x=1").try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = Parser::new("(x+1").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_closing_parenthesis() {
        let err = Parser::new(")").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "unclosed parenthesis");
    }

    /// Parses the input on a thread with the stack size of a tokio blocking thread.
    fn parse_on_small_stack(input: String) -> Result<Expr, Error> {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || Parser::new(&input).try_parse_full::<Expr>())
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn deep_nesting_is_rejected() {
        for input in [
            format!("x{}", "^x".repeat(2000)),
            format!("{}x", "-".repeat(4000)),
            format!("{}x{}", "(".repeat(2000), ")".repeat(2000)),
            format!("{}x{}", "sin(".repeat(1000), ")".repeat(1000)),
            format!("{}1{}", "[".repeat(2000), "]".repeat(2000)),
        ] {
            let err = parse_on_small_stack(input).unwrap_err();
            assert_eq!(err.kind.message(), "expression is nested too deeply");
        }
    }

    #[test]
    fn moderate_nesting_is_accepted() {
        let input = format!("{}x{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert!(parse_on_small_stack(input).is_ok());
        assert!(parse_on_small_stack(format!("x{}", "^x".repeat(MAX_DEPTH / 2))).is_ok());
    }

    #[test]
    fn empty_parenthesis() {
        let err = Parser::new("()").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "missing expression inside parenthesis");
    }
}
