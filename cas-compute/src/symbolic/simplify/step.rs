/// A type that collects the steps taken by the simplifier.
///
/// [`StepCollector`] is implemented for the unit type `()`, which discards every step, and for
/// [`Vec`], which records them in order.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`
    /// `a*(b*c) = a*b*c`
    Flatten,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `2+3 = 5`
    /// `1/2+0.25 = 0.75`
    AddNumbers,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// etc.
    CombineLikeTerms,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    /// `sqrt(2)*sqrt(3) = sqrt(6)`
    /// etc.
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerPower,

    /// `2^3 = 8`
    /// `sqrt(12) = 2*sqrt(3)`
    NumericPower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c*b^c`
    DistributePower,

    /// `i^(4n) = 1`
    I0,

    /// `i^(4n+1) = i`
    I1,

    /// `i^(4n+2) = -1`
    I2,

    /// `i^(4n+3) = -i`
    I3,

    /// `sin(pi/6) = 1/2`, `cosh(0) = 1`, etc.
    TrigValue,

    /// `sin(-x) = -sin(x)`
    /// `cos(-x) = cos(x)`
    Symmetry,

    /// `asin(1/2) = pi/6`, etc.
    InverseTrigValue,

    /// `sin(asin(x)) = x`
    FunctionOfInverse,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,

    /// `log(1) = 0`
    /// `log(e) = 1`
    /// `log(8) = 3*log(2)`
    LogValue,

    /// `e^log(x) = x`
    /// `e^(2*log(x)) = x^2`
    ExpLog,

    /// `abs(-3) = 3`
    /// `sign(-3) = -1`
    AbsValue,

    /// `sin(0.5) = 0.479425538604203`
    EvaluateFloat,
}
