use cas_error::Error;
use cas_parser::parser::{
    ast::{Binary, Call, Expr as AstExpr, Literal, Unary},
    error::kind::InvalidNumber,
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::primitive::{float_from_str, int_from_str};
use super::{error::{UnexpectedList, UnknownFunction, WrongArgumentCount}, Const, Expr, Func};

/// Names that can be called in addition to the ones in [`Func::ALL`]. They are rewritten in
/// terms of the known functions during conversion.
const REWRITTEN: [&str; 5] = ["exp", "sqrt", "sec", "csc", "cot"];

/// Returns the known function name closest to `name`, if there is one within a small edit
/// distance.
fn suggest(name: &str) -> Option<String> {
    Func::ALL.iter()
        .map(|func| func.name())
        .chain(REWRITTEN)
        .map(|known| (levenshtein::levenshtein(name, known), known))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known.to_string())
}

/// Converts a literal into an [`Expr`].
fn convert_literal(literal: Literal) -> Result<Expr, Error> {
    match literal {
        Literal::Integer(int) => int_from_str(&int.value)
            .map(Expr::number)
            .ok_or_else(|| Error::new(vec![int.span], InvalidNumber)),
        Literal::Float(float) => float_from_str(&float.value)
            .map(Expr::float)
            .ok_or_else(|| Error::new(vec![float.span], InvalidNumber)),
        Literal::Symbol(sym) => Ok(match sym.name.as_str() {
            "pi" => Expr::constant(Const::Pi),
            "E" | "e" => Expr::constant(Const::E),
            "I" => Expr::constant(Const::I),
            _ => Expr::symbol(sym.name),
        }),
    }
}

/// Converts a function call into an [`Expr`].
fn convert_call(call: Call) -> Result<Expr, Error> {
    let spans = call.outer_span().to_vec();
    let Call { name: sym, args, .. } = call;
    let name = sym.name.clone();
    let mut args = args.into_iter()
        .map(Expr::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    // `log(x, b)` is the logarithm of `x` to the base `b`
    if name == "log" && args.len() == 2 {
        let base = args.remove(1);
        return Ok(args.remove(0).log() / base.log());
    }

    let known = Func::from_name(&name).is_some() || REWRITTEN.contains(&name.as_str());
    if !known {
        // a single letter followed by parentheses, such as `x(x + 1)`, is multiplication
        if name.chars().count() == 1 && args.len() == 1 {
            let lhs = convert_literal(Literal::Symbol(sym))?;
            return Ok(lhs * args.remove(0));
        }

        let suggestion = suggest(&name);
        return Err(Error::new(spans, UnknownFunction { name, suggestion }));
    }

    if args.len() != 1 {
        let expected = if name == "log" { "1 or 2" } else { "1" };
        let given = args.len();
        return Err(Error::new(spans, WrongArgumentCount { name, expected, given }));
    }

    let arg = args.remove(0);
    Ok(match name.as_str() {
        "exp" => arg.exp(),
        "sqrt" => arg.sqrt(),
        "sec" => Expr::call(Func::Cos, arg).recip(),
        "csc" => Expr::call(Func::Sin, arg).recip(),
        "cot" => Expr::call(Func::Tan, arg).recip(),
        _ => match Func::from_name(&name) {
            Some(func) => Expr::call(func, arg),
            None => return Err(Error::new(spans, UnknownFunction { name, suggestion: None })),
        },
    })
}

/// Converts a unary operation into an [`Expr`].
fn convert_unary(unary: Unary) -> Result<Expr, Error> {
    let operand = Expr::try_from(*unary.operand)?;
    Ok(match unary.op.kind {
        UnaryOpKind::Neg => -operand,
        UnaryOpKind::Pos => operand,
    })
}

/// Converts a binary operation into an [`Expr`].
fn convert_binary(binary: Binary) -> Result<Expr, Error> {
    let lhs = Expr::try_from(*binary.lhs)?;
    let rhs = Expr::try_from(*binary.rhs)?;
    Ok(match binary.op.kind {
        BinOpKind::Exp => Expr::pow(lhs, rhs),
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => lhs / rhs,
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
    })
}

/// Converts a parsed expression into an [`Expr`].
///
/// Conversion fails if the expression calls an unknown function, calls a function with the wrong
/// number of arguments, or contains a list.
impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(literal) => convert_literal(literal),
            AstExpr::Paren(paren) => Expr::try_from(*paren.expr),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::List(list) => Err(Error::new(vec![list.span], UnexpectedList)),
            AstExpr::Unary(unary) => convert_unary(unary),
            AstExpr::Binary(binary) => convert_binary(binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use cas_error::ErrorKind;
    use cas_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn convert(input: &str) -> Result<Expr, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast)
    }

    #[test]
    fn single_letter_call_is_multiplication() {
        let expr = convert("x(x+1)").unwrap();
        assert_eq!(expr, Expr::Mul(vec![
            Expr::symbol("x"),
            Expr::Add(vec![Expr::symbol("x"), Expr::one()]),
        ]));
    }

    #[test]
    fn log_with_base() {
        let expr = convert("log(8, 2)").unwrap();
        assert_eq!(expr, Expr::int(8).log() / Expr::int(2).log());
    }

    #[test]
    fn unknown_function_has_suggestion() {
        let err = convert("sinn(x)").unwrap_err();
        assert_eq!(err.kind.message(), "unknown function `sinn`");
        assert_eq!(err.spans, vec![0..5, 6..7]);
        assert!(err.report_to_string("input", "sinn(x)").contains("did you mean"));
    }

    #[test]
    fn wrong_argument_count() {
        let err = convert("sin(x, y)").unwrap_err();
        assert_eq!(err.kind.message(), "`sin` takes 1 argument, but 2 were given");
    }

    #[test]
    fn list_is_rejected() {
        let err = convert("[1, 2]").unwrap_err();
        assert_eq!(err.kind.message(), "unexpected list");
    }
}
