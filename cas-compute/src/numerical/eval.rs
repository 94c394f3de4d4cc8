use rug::{ops::Pow, Complex};
use crate::consts::{E, I, PI};
use crate::primitive::{complex, float};
use crate::symbolic::expr::{Const, Expr, Func, Primary};
use super::{ctxt::Ctxt, error::EvalError};

/// Any type that can be evaluated to produce a complex number.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<Complex, EvalError>;

    /// Evaluate the expression to produce a value, using an empty context.
    fn eval_default(&self) -> Result<Complex, EvalError> {
        self.eval(&Ctxt::default())
    }
}

/// Applies a known function to a complex number, using the principal branch for the inverse
/// functions and the logarithm.
fn apply_func(func: Func, z: Complex) -> Complex {
    match func {
        Func::Sin => z.sin(),
        Func::Cos => z.cos(),
        Func::Tan => z.tan(),
        Func::Asin => z.asin(),
        Func::Acos => z.acos(),
        Func::Atan => z.atan(),
        Func::Sinh => z.sinh(),
        Func::Cosh => z.cosh(),
        Func::Tanh => z.tanh(),
        Func::Log => z.ln(),
        Func::Abs => complex(float(z.abs_ref())),
        Func::Sign => if z.is_zero() {
            z
        } else {
            let norm = complex(float(z.abs_ref()));
            z / norm
        },
    }
}

/// Raises `base` to the power of `exp`, using the principal branch.
fn pow(base: Complex, exp: Complex) -> Complex {
    if base.is_zero() {
        // `0^z` is only defined for `Re(z) > 0`
        return if *exp.real() > 0 {
            complex(0)
        } else {
            complex(f64::NAN)
        };
    }

    let integer = exp.imag().is_zero()
        .then(|| exp.real().to_integer())
        .flatten()
        .filter(|n| float(n) == *exp.real())
        .and_then(|n| n.to_i32());
    match integer {
        Some(n) => base.pow(n),
        None => base.pow(&exp),
    }
}

impl Eval for Primary {
    fn eval(&self, ctxt: &Ctxt) -> Result<Complex, EvalError> {
        Ok(match self {
            Primary::Number(n) => complex(float(n)),
            Primary::Float(f) => complex(f),
            Primary::Symbol(sym) => ctxt.get_var(sym)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(sym.clone()))?,
            Primary::Const(Const::Pi) => complex(&*PI),
            Primary::Const(Const::E) => complex(&*E),
            Primary::Const(Const::I) => I.clone(),
            Primary::Call(func, arg) => apply_func(*func, arg.eval(ctxt)?),
        })
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<Complex, EvalError> {
        let value = match self {
            Expr::Primary(primary) => primary.eval(ctxt)?,
            Expr::Add(terms) => terms.iter()
                .try_fold(complex(0), |acc, term| Ok(acc + term.eval(ctxt)?))?,
            Expr::Mul(factors) => factors.iter()
                .try_fold(complex(1), |acc, factor| Ok(acc * factor.eval(ctxt)?))?,
            Expr::Exp(base, exp) => pow(base.eval(ctxt)?, exp.eval(ctxt)?),
        };

        if value.real().is_finite() && value.imag().is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite(self.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(ast).unwrap()
    }

    fn real(input: &str) -> f64 {
        parse(input).eval_default().unwrap().real().to_f64()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(real("2^10"), 1024.0);
        assert_eq!(real("1/4 + 3/4"), 1.0);
        assert_float_absolute_eq!(real("sin(pi/2) + cos(0)"), 2.0, 1e-15);
        assert_float_absolute_eq!(real("log(exp(3))"), 3.0, 1e-15);
    }

    #[test]
    fn complex_results() {
        let value = parse("sqrt(-4)").eval_default().unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 0.0, 1e-15);
        assert_float_absolute_eq!(value.imag().to_f64(), 2.0, 1e-15);

        let value = parse("I^2").eval_default().unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), -1.0, 1e-15);
    }

    #[test]
    fn variables() {
        let ctxt = Ctxt::with_var("x", complex(3));
        let value = parse("x^2 + 5x + 6").eval(&ctxt).unwrap();
        assert_eq!(value.real().to_f64(), 30.0);

        let err = parse("x + y").eval(&ctxt).unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("y".to_string()));
    }

    #[test]
    fn division_by_zero() {
        let ctxt = Ctxt::with_var("x", complex(0));
        assert!(matches!(parse("1/x").eval(&ctxt), Err(EvalError::NonFinite(_))));
        assert!(matches!(parse("log(x)").eval(&ctxt), Err(EvalError::NonFinite(_))));
    }
}
