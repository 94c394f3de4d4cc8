pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot classify is kept as a [`TokenKind::Symbol`] token, so the parser can
/// point at it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn polynomial_with_implicit_product() {
        compare_tokens(
            "x^2+5x+6=0",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Add, "+"),
                (TokenKind::Int, "5"),
                (TokenKind::Name, "x"),
                (TokenKind::Add, "+"),
                (TokenKind::Int, "6"),
                (TokenKind::Assign, "="),
                (TokenKind::Int, "0"),
            ],
        );
    }

    #[test]
    fn double_star_is_power() {
        compare_tokens(
            "x**2*y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn matrix_literal() {
        compare_tokens(
            "[[1,2.5],[.5,x2]]",
            [
                (TokenKind::OpenSquare, "["),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Int, "1"),
                (TokenKind::Comma, ","),
                (TokenKind::Float, "2.5"),
                (TokenKind::CloseSquare, "]"),
                (TokenKind::Comma, ","),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Float, ".5"),
                (TokenKind::Comma, ","),
                (TokenKind::Name, "x2"),
                (TokenKind::CloseSquare, "]"),
                (TokenKind::CloseSquare, "]"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        let tokens = tokenize_complete("3 $ ?");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Int,
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Symbol,
        ]);
    }
}
