use cas_compute::numerical::Func;
use super::{GraphOptions, GraphPoint};

/// A run of consecutive samples at which the function has a finite real value. A curve is drawn
/// as one connected line per segment.
pub(crate) type Segment = Vec<GraphPoint<f64>>;

/// Evaluates the function at [`GraphOptions::samples`] evenly spaced points across the `x` range,
/// including both ends.
///
/// Points where the function is undefined, complex or infinite are skipped, and split the samples
/// into separate [`Segment`]s so that the drawn line does not jump across them.
pub(crate) fn sample(func: &Func, options: &GraphOptions) -> Vec<Segment> {
    let (start, end) = options.x_bounds();
    let steps = options.samples.max(2) - 1;

    let mut segments = Vec::new();
    let mut current = Vec::new();
    for i in 0..=steps {
        let x = start + (end - start) * i as f64 / steps as f64;
        match func.call(x) {
            Some(y) if y.is_finite() => current.push(GraphPoint(x, y)),
            _ => if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            },
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Returns the `(min, max)` of the `y` values across every sampled curve, or [`None`] if there
/// are no samples at all.
pub(crate) fn y_range(curves: &[Vec<Segment>]) -> Option<(f64, f64)> {
    curves.iter()
        .flatten()
        .flatten()
        .map(|point| point.1)
        .fold(None, |range, y| match range {
            None => Some((y, y)),
            Some((min, max)) => Some((y.min(min), y.max(max))),
        })
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::expr::Expr;
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn func(input: &str) -> Func {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Func::new(Expr::try_from(ast).unwrap(), "x")
    }

    #[test]
    fn samples_cover_range() {
        let segments = sample(&func("x^2"), &GraphOptions::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 400);
        assert_eq!(segments[0].first(), Some(&GraphPoint(-10.0, 100.0)));
        assert_eq!(segments[0].last(), Some(&GraphPoint(10.0, 100.0)));
    }

    #[test]
    fn undefined_points_break_the_line() {
        let options = GraphOptions::default();

        let segments = sample(&func("sqrt(x)"), &options);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].iter().all(|point| point.0 >= 0.0));

        let segments = sample(&func("sqrt(x^2 - 25)"), &options);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn range_across_curves() {
        let options = GraphOptions::default();
        let curves = vec![
            sample(&func("x"), &options),
            sample(&func("x^2 + 5"), &options),
        ];
        assert_eq!(y_range(&curves), Some((-10.0, 105.0)));
        assert_eq!(y_range(&[sample(&func("sqrt(-1 - x^2)"), &options)]), None);
    }
}
