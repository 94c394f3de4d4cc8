//! Evaluation of functions and powers with floating-point arguments.
//!
//! Once a float appears in an expression, exactness is already lost, so operations on floats are
//! evaluated numerically instead of being kept symbolic.

use rug::{ops::Pow, Float};
use crate::consts::{E, PI};
use crate::primitive::float;
use crate::symbolic::{
    expr::{Const, Expr, Func, Primary},
    simplify::{rules::do_power, step::{Step, StepCollector}},
};

/// Converts a numeric or constant expression to a float.
fn to_float(expr: &Expr) -> Option<Float> {
    match expr {
        Expr::Primary(Primary::Number(n)) => Some(float(n)),
        Expr::Primary(Primary::Float(f)) => Some(f.clone()),
        Expr::Primary(Primary::Const(Const::E)) => Some(E.clone()),
        Expr::Primary(Primary::Const(Const::Pi)) => Some(PI.clone()),
        _ => None,
    }
}

/// Applies a known function to a float. Returns `None` if the result is not a real number.
pub(crate) fn apply_func(func: Func, x: Float) -> Option<Float> {
    let value = match func {
        Func::Sin => x.sin(),
        Func::Cos => x.cos(),
        Func::Tan => x.tan(),
        Func::Asin => x.asin(),
        Func::Acos => x.acos(),
        Func::Atan => x.atan(),
        Func::Sinh => x.sinh(),
        Func::Cosh => x.cosh(),
        Func::Tanh => x.tanh(),
        Func::Log => x.ln(),
        Func::Abs => x.abs(),
        Func::Sign => if x.is_zero() {
            float(0)
        } else if x.is_sign_negative() {
            float(-1)
        } else {
            float(1)
        },
    };

    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// `sin(0.5) = 0.479425538604203`
pub fn evaluate_call(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    let value = apply_func(func, arg.as_float()?.clone())?;

    step_collector.push(Step::EvaluateFloat);
    Some(Expr::float(value))
}

/// `2^0.5 = 1.4142135623731`
/// `0.5^2 = 0.25`
pub fn evaluate_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        if base.as_float().is_none() && exp.as_float().is_none() {
            return None;
        }

        let base = to_float(base)?;
        let exp = to_float(exp)?;
        let integer_exp = exp.is_integer();
        if base.is_sign_negative() && !integer_exp {
            return None;
        }

        let value = base.pow(&exp);
        if value.is_finite() {
            Some(Expr::float(value))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::EvaluateFloat);
    Some(opt)
}

/// Applies all float evaluation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    evaluate_call(expr, step_collector)
        .or_else(|| evaluate_power(expr, step_collector))
}
