//! Simplification rules for expressions involving the imaginary unit.

use crate::symbolic::{
    expr::{Const, Expr},
    simplify::{rules::do_power, step::{Step, StepCollector}},
};

// I^..
// 0 1 2  3
// 1 I -1 -I
//
// 4 5 6  7
// 1 I -1 -I

/// Returns the exponent modulo 4 if the expression is `I` raised to an integer.
fn residue(base: &Expr, exp: &Expr) -> Option<u32> {
    if base.is_const(Const::I) {
        Some(exp.as_integer()?.mod_u(4))
    } else {
        None
    }
}

/// `I^(4n) = 1`
///
/// `I^0` can be handled by `power_zero`, but this rule is more general.
pub fn i_pow_0(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        (residue(base, exp)? == 0).then(Expr::one)
    })?;

    step_collector.push(Step::I0);
    Some(opt)
}

/// `I^(4n+1) = I`
pub fn i_pow_1(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        (residue(base, exp)? == 1).then(|| Expr::constant(Const::I))
    })?;

    step_collector.push(Step::I1);
    Some(opt)
}

/// `I^(4n+2) = -1`
pub fn i_pow_2(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        (residue(base, exp)? == 2).then(|| Expr::int(-1))
    })?;

    step_collector.push(Step::I2);
    Some(opt)
}

/// `I^(4n+3) = -I`
pub fn i_pow_3(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        (residue(base, exp)? == 3).then(|| -Expr::constant(Const::I))
    })?;

    step_collector.push(Step::I3);
    Some(opt)
}

/// Applies all imaginary unit rules.
///
/// All imaginary unit rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    i_pow_0(expr, step_collector)
        .or_else(|| i_pow_1(expr, step_collector))
        .or_else(|| i_pow_2(expr, step_collector))
        .or_else(|| i_pow_3(expr, step_collector))
}
