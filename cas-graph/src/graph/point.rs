//! Coordinate pairs. Graph space and canvas space get distinct types so that a point cannot be
//! drawn without first being transformed.

macro_rules! point_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name<T>(pub T, pub T);

        impl<T> $name<T> {
            /// Applies `f` to both coordinates.
            pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> $name<U> {
                $name(f(self.0), f(self.1))
            }
        }

        impl<T> From<(T, T)> for $name<T> {
            fn from((x, y): (T, T)) -> Self {
                $name(x, y)
            }
        }
    };
}

point_type! {
    /// An `(x, y)` pair measured in the units of the plotted function.
    GraphPoint
}

point_type! {
    /// An `(x, y)` pair measured in pixels, with the origin at the top-left of the canvas.
    CanvasPoint
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn map_both_coordinates() {
        assert_eq!(CanvasPoint(1000u16, 600).map(f64::from), CanvasPoint(1000.0, 600.0));
        assert_eq!(GraphPoint::from((2.0, -3.0)).map(|v: f64| v * 2.0), GraphPoint(4.0, -6.0));
    }
}
