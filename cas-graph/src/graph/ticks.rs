//! Tick placement along an axis.

/// Returns the distance between ticks that splits `span` into roughly `target` pieces, rounded to
/// 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let nice = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

/// Returns the tick positions inside `(min, max)`, and the step between them.
pub(crate) fn ticks((min, max): (f64, f64), target: usize) -> (Vec<f64>, f64) {
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    let values = (first..=last)
        .map(|k| k as f64 * step)
        .collect();
    (values, step)
}

/// Formats a tick value with as many decimal places as the step needs.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    if value.abs() < step / 2.0 {
        return "0".to_string();
    }
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(20.0, 10), 2.0);
        assert_eq!(nice_step(110.0, 8), 20.0);
        assert_eq!(nice_step(1000.0, 10), 100.0);
        assert_float_absolute_eq!(nice_step(3.0, 10), 0.5, 1e-12);
    }

    #[test]
    fn tick_positions() {
        let (values, step) = ticks((-10.0, 10.0), 10);
        assert_eq!(step, 2.0);
        assert_eq!(values, vec![-10.0, -8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let (values, _) = ticks((-5.5, 105.5), 8);
        assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(2.5, 0.5), "2.5");
        assert_eq!(format_tick(-1e-17, 0.5), "0");
        assert_eq!(format_tick(-7.5, 0.5), "-7.5");
    }
}
