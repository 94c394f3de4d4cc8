use crate::primitive::complex;
use crate::symbolic::expr::Expr;
use super::{ctxt::Ctxt, eval::Eval};

/// Imaginary parts smaller than this, relative to the real part, are treated as rounding error.
const IMAG_TOLERANCE: f64 = 1e-12;

/// An expression in a single variable, callable as a real function.
///
/// This is used to sample an expression at many points, such as when plotting it.
#[derive(Debug, Clone)]
pub struct Func {
    /// The expression to evaluate.
    expr: Expr,

    /// The variable the argument is bound to.
    var: String,
}

impl Func {
    /// Creates a callable from the given expression, binding the argument to `var`.
    pub fn new(expr: Expr, var: impl Into<String>) -> Self {
        Self { expr, var: var.into() }
    }

    /// Evaluates the expression with `var` bound to `x`.
    ///
    /// Returns [`None`] if the expression cannot be evaluated at `x`, or if the value is not a
    /// finite real number.
    pub fn call(&self, x: f64) -> Option<f64> {
        let ctxt = Ctxt::with_var(&self.var, complex(x));
        let value = self.expr.eval(&ctxt).ok()?;

        let re = value.real().to_f64();
        let im = value.imag().to_f64();
        if re.is_finite() && im.abs() <= IMAG_TOLERANCE * re.abs().max(1.0) {
            Some(re)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn func(input: &str) -> Func {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Func::new(Expr::try_from(ast).unwrap(), "x")
    }

    #[test]
    fn real_values() {
        let f = func("x^2 - 1");
        assert_eq!(f.call(3.0), Some(8.0));
        assert_float_absolute_eq!(func("sin(x)").call(1.0).unwrap(), 1f64.sin(), 1e-15);
    }

    #[test]
    fn undefined_points() {
        assert_eq!(func("1/x").call(0.0), None);
        assert_eq!(func("sqrt(x)").call(-1.0), None);
        assert_eq!(func("log(x)").call(-2.0), None);
    }
}
