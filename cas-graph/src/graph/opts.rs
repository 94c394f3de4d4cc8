use super::point::{CanvasPoint, GraphPoint};

/// Options to use when drawing a graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphOptions {
    /// The width and height of the canvas, in pixels.
    ///
    /// The default value is `(1000, 600)`.
    pub canvas_size: CanvasPoint<u16>,

    /// The space, in pixels, between the plot area and the edges of the canvas, given as
    /// `(left, top, right, bottom)`. The title, tick labels and axis labels are drawn here.
    ///
    /// The default value is `(80, 60, 30, 60)`.
    pub margin: (f64, f64, f64, f64),

    /// The `(x, y)` point at the center of the plot area.
    ///
    /// The `y` value is computed from the samples when the graph is drawn.
    pub center: GraphPoint<f64>,

    /// The `(x, y)` distance, in graph units, from the center of the plot area to its edges.
    ///
    /// The `y` value is computed from the samples when the graph is drawn.
    pub scale: GraphPoint<f64>,

    /// The number of evenly spaced points at which each curve is evaluated, including both ends
    /// of the `x` range.
    ///
    /// The default value is `400`.
    pub samples: usize,

    /// The fraction of the sampled `y` range added above and below it.
    ///
    /// The default value is `0.05`.
    pub y_padding: f64,

    /// The opacity of the grid lines, in the range `0.0` to `1.0`.
    ///
    /// The default value is `0.3`.
    pub grid_opacity: f64,
}

/// The default options plot `x` from `-10` to `10` on a `1000×600` canvas.
impl Default for GraphOptions {
    fn default() -> GraphOptions {
        GraphOptions {
            canvas_size: CanvasPoint(1000, 600),
            margin: (80.0, 60.0, 30.0, 60.0),
            center: GraphPoint(0.0, 0.0),
            scale: GraphPoint(10.0, 1.0),
            samples: 400,
            y_padding: 0.05,
            grid_opacity: 0.3,
        }
    }
}

impl GraphOptions {
    /// Set the canvas size. Returns an updated [`GraphOptions`] for chaining.
    pub fn canvas_size(mut self, width: u16, height: u16) -> Self {
        self.canvas_size = CanvasPoint(width, height);
        self
    }

    /// Set the range of `x` values to plot. Returns an updated [`GraphOptions`] for chaining.
    pub fn x_range(mut self, start: f64, end: f64) -> Self {
        self.center.0 = (start + end) / 2.0;
        self.scale.0 = (end - start) / 2.0;
        self
    }

    /// Set the number of samples per curve. Returns an updated [`GraphOptions`] for chaining.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Returns the `(min, max)` range of `x` values to plot.
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.center.0 - self.scale.0, self.center.0 + self.scale.0)
    }

    /// Returns the `(min, max)` range of `y` values to plot.
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.center.1 - self.scale.1, self.center.1 + self.scale.1)
    }

    /// Fits the `y` range to the given sampled range, adding [`GraphOptions::y_padding`] on both
    /// sides. A flat range is widened to one unit above and below the value.
    pub(crate) fn fit_y(&mut self, (min, max): (f64, f64)) {
        let span = max - min;
        if span <= f64::EPSILON * min.abs().max(max.abs()).max(1.0) {
            self.center.1 = min;
            self.scale.1 = 1.0;
        } else {
            self.center.1 = (min + max) / 2.0;
            self.scale.1 = span / 2.0 + span * self.y_padding;
        }
    }

    /// Returns the size of the plot area, in pixels.
    pub(crate) fn plot_size(&self) -> CanvasPoint<f64> {
        let (left, top, right, bottom) = self.margin;
        let size = self.canvas_size.map(f64::from);
        CanvasPoint(size.0 - left - right, size.1 - top - bottom)
    }

    /// Converts an x-value in **graph** space to an x-value in **canvas** space.
    pub(crate) fn x_to_canvas(&self, x: f64) -> f64 {
        // 0.0 is the left edge of the plot area, 1.0 is the right edge
        let normalized = (x - self.center.0) / (self.scale.0 * 2.0) + 0.5;
        self.margin.0 + normalized * self.plot_size().0
    }

    /// Converts a y-value in **graph** space to a y-value in **canvas** space.
    pub(crate) fn y_to_canvas(&self, y: f64) -> f64 {
        // flipped, so that 0.0 is the top edge of the plot area
        let normalized = 0.5 - (y - self.center.1) / (self.scale.1 * 2.0);
        self.margin.1 + normalized * self.plot_size().1
    }

    /// Converts a point in **graph** space to **canvas** space.
    pub fn to_canvas(&self, point: GraphPoint<f64>) -> CanvasPoint<f64> {
        CanvasPoint(
            self.x_to_canvas(point.0),
            self.y_to_canvas(point.1),
        )
    }

    /// Converts an x-value in **canvas** space to an x-value in **graph** space.
    pub(crate) fn x_to_graph(&self, x: f64) -> f64 {
        let normalized = (x - self.margin.0) / self.plot_size().0;
        normalized * self.scale.0 * 2.0 + self.center.0 - self.scale.0
    }

    /// Converts a y-value in **canvas** space to a y-value in **graph** space.
    pub(crate) fn y_to_graph(&self, y: f64) -> f64 {
        let normalized = 1.0 - (y - self.margin.1) / self.plot_size().1;
        normalized * self.scale.1 * 2.0 + self.center.1 - self.scale.1
    }

    /// Converts a point in **canvas** space to **graph** space.
    pub fn to_graph(&self, point: CanvasPoint<f64>) -> GraphPoint<f64> {
        GraphPoint(
            self.x_to_graph(point.0),
            self.y_to_graph(point.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn options() -> GraphOptions {
        GraphOptions {
            canvas_size: CanvasPoint(465, 917),
            center: GraphPoint(-3.0, 2.41),
            scale: GraphPoint(3.59, 5.69),
            ..Default::default()
        }
    }

    #[test]
    fn canvas_to_graph() {
        let options = options();
        let (left, top, right, bottom) = options.margin;

        assert_float_absolute_eq!(options.x_to_graph(left), options.center.0 - options.scale.0, 1e-9);
        assert_float_absolute_eq!(
            options.x_to_graph(options.canvas_size.0 as f64 - right),
            options.center.0 + options.scale.0,
            1e-9
        );
        assert_float_absolute_eq!(options.y_to_graph(top), options.center.1 + options.scale.1, 1e-9);
        assert_float_absolute_eq!(
            options.y_to_graph(options.canvas_size.1 as f64 - bottom),
            options.center.1 - options.scale.1,
            1e-9
        );
    }

    #[test]
    fn graph_to_canvas() {
        let options = options();
        let (left, top, right, bottom) = options.margin;

        assert_float_absolute_eq!(options.x_to_canvas(options.center.0 - options.scale.0), left, 1e-9);
        assert_float_absolute_eq!(
            options.x_to_canvas(options.center.0 + options.scale.0),
            options.canvas_size.0 as f64 - right,
            1e-9
        );
        assert_float_absolute_eq!(options.y_to_canvas(options.center.1 + options.scale.1), top, 1e-9);
        assert_float_absolute_eq!(
            options.y_to_canvas(options.center.1 - options.scale.1),
            options.canvas_size.1 as f64 - bottom,
            1e-9
        );
    }

    #[test]
    fn round_trip_point() {
        let options = options();
        let point = GraphPoint(-1.25, 4.5);
        let back = options.to_graph(options.to_canvas(point));
        assert_float_absolute_eq!(back.0, point.0, 1e-9);
        assert_float_absolute_eq!(back.1, point.1, 1e-9);
    }

    #[test]
    fn default_x_range() {
        assert_eq!(GraphOptions::default().x_bounds(), (-10.0, 10.0));
        assert_eq!(GraphOptions::default().x_range(0.0, 4.0).x_bounds(), (0.0, 4.0));
    }

    #[test]
    fn fit_y_pads_range() {
        let mut options = GraphOptions::default();
        options.fit_y((0.0, 100.0));
        let (min, max) = options.y_bounds();
        assert_float_absolute_eq!(min, -5.0, 1e-9);
        assert_float_absolute_eq!(max, 105.0, 1e-9);

        options.fit_y((3.0, 3.0));
        assert_eq!(options.y_bounds(), (2.0, 4.0));
    }
}
