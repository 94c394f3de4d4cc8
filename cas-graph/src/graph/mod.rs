//! Line plots of single-variable expressions.
//!
//! To build an image of a graph, create a [`Graph`] and add one or more expressions in `x` to it,
//! then call [`Graph::draw()`] for a [`cairo`] surface, or [`Graph::to_png()`] for the encoded
//! image.
//!
//! # Sampling
//!
//! Each expression is evaluated at [`GraphOptions::samples`] evenly spaced points across the `x`
//! range, in parallel across expressions. Points where the value is undefined, complex or
//! infinite are skipped and break the line, so `1/x` or `sqrt(x)` are drawn without spurious
//! connecting lines.
//!
//! # Layout
//!
//! The `y` range is fitted to the finite samples of every curve, with a small padding above and
//! below. Grid lines are placed at "nice" steps (1, 2 or 5 times a power of ten) and the axes
//! are drawn through the origin when it is visible.

mod eval;
pub mod opts;
pub mod point;
mod ticks;

use cairo::{Context, Error, FontSlant, FontWeight, Format, ImageSurface};
use cas_compute::{numerical::Func, symbolic::expr::Expr};
use cas_parser::parser::{ast::Expr as AstExpr, Parser};
use eval::Segment;
pub use opts::GraphOptions;
pub use point::{CanvasPoint, GraphPoint};
use rayon::prelude::*;
use thiserror::Error;
use super::text_align::ShowTextAlign;

/// The variable that expressions are plotted against.
pub const VARIABLE: &str = "x";

/// The color of the first curve.
const BLUE: (f64, f64, f64) = (0.0, 0.0, 1.0);

/// Colors of the second and later curves, in order.
const PALETTE: [(f64, f64, f64); 10] = [
    (0.122, 0.467, 0.706),
    (1.000, 0.498, 0.055),
    (0.173, 0.627, 0.173),
    (0.839, 0.153, 0.157),
    (0.580, 0.404, 0.741),
    (0.549, 0.337, 0.294),
    (0.890, 0.467, 0.761),
    (0.498, 0.498, 0.498),
    (0.737, 0.741, 0.133),
    (0.090, 0.745, 0.812),
];

/// Returns the color of the curve at the given index.
fn curve_color(index: usize) -> (f64, f64, f64) {
    match index {
        0 => BLUE,
        n => PALETTE[n % PALETTE.len()],
    }
}

/// An error that can occur while building or drawing a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph has no expressions to plot.
    #[error("there is nothing to plot")]
    NoExpressions,

    /// An expression could not be parsed.
    #[error("invalid expression `{input}`: {error}")]
    Parse {
        /// The source text of the expression.
        input: String,

        /// The parse or conversion error, with spans into `input`.
        error: cas_error::Error,
    },

    /// None of the expressions has a finite real value anywhere in the plotted range.
    #[error("no finite values in the plotted range")]
    NoFiniteSamples,

    /// Drawing to the surface failed.
    #[error("could not draw the graph: {0}")]
    Draw(#[from] Error),

    /// Encoding the surface as a PNG failed.
    #[error("could not encode the graph: {0}")]
    Encode(#[from] cairo::IoError),
}

/// Splits the input at commas that are not nested in parentheses or brackets, trimming each part
/// and dropping the empty ones.
///
/// `x^2, sin(x)` yields `x^2` and `sin(x)`.
pub fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    parts.push(&input[start..]);

    parts.into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// A curve to draw.
#[derive(Clone, Debug)]
struct Curve {
    /// The function to sample.
    func: Func,
}

/// A graph containing curves to draw.
///
/// See the [module-level documentation](self) for more information.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The curves to draw, in order.
    curves: Vec<Curve>,

    /// The title drawn above the plot area.
    title: Option<String>,

    /// The rendering options for the graph.
    pub options: GraphOptions,
}

impl Graph {
    /// Create a new, empty graph.
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Create a new graph with the given options.
    pub fn with_opts(options: GraphOptions) -> Graph {
        Graph {
            options,
            ..Graph::default()
        }
    }

    /// Returns the number of curves in the graph.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if the graph has no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Add an expression in `x` to the graph.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn add_expr(&mut self, expr: Expr) -> &mut Self {
        self.curves.push(Curve { func: Func::new(expr, VARIABLE) });
        self
    }

    /// Tries to parse the given expression and add it to the graph.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn try_add_expr(&mut self, input: &str) -> Result<&mut Self, GraphError> {
        let parse_error = |error| GraphError::Parse { input: input.to_string(), error };
        let ast = Parser::new(input)
            .try_parse_full::<AstExpr>()
            .map_err(parse_error)?;
        let expr = Expr::try_from(ast).map_err(parse_error)?;
        Ok(self.add_expr(expr))
    }

    /// Tries to parse each of the comma-separated expressions in the input and add them to the
    /// graph, in order.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn try_add_exprs(&mut self, input: &str) -> Result<&mut Self, GraphError> {
        for part in split_top_level(input) {
            self.try_add_expr(part)?;
        }
        Ok(self)
    }

    /// Set the title drawn above the plot area.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Samples every curve, fits the `y` range to the samples, and draws the graph to a new
    /// [`ImageSurface`] with the graph's canvas size.
    pub fn draw(&self) -> Result<ImageSurface, GraphError> {
        if self.curves.is_empty() {
            return Err(GraphError::NoExpressions);
        }

        let sampled = self.curves.par_iter()
            .map(|curve| eval::sample(&curve.func, &self.options))
            .collect::<Vec<_>>();
        let range = eval::y_range(&sampled).ok_or(GraphError::NoFiniteSamples)?;

        let mut options = self.options;
        options.fit_y(range);

        let surface = ImageSurface::create(
            Format::ARgb32,
            options.canvas_size.0 as i32,
            options.canvas_size.1 as i32,
        )?;
        let context = Context::new(&surface)?;

        context.set_source_rgb(1.0, 1.0, 1.0);
        context.paint()?;
        context.select_font_face("sans-serif", FontSlant::Normal, FontWeight::Normal);

        draw_grid(&context, &options)?;
        draw_origin_axes(&context, &options)?;
        draw_frame(&context, &options)?;
        draw_curves(&context, &options, &sampled)?;
        self.draw_labels(&context, &options)?;

        // release the context's reference so the surface data can be encoded
        drop(context);
        Ok(surface)
    }

    /// Draws the graph and encodes it as a PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, GraphError> {
        let surface = self.draw()?;
        let mut png = Vec::new();
        surface.write_to_png(&mut png)?;
        Ok(png)
    }

    /// Draw the title and axis labels.
    fn draw_labels(&self, context: &Context, options: &GraphOptions) -> Result<(), Error> {
        let (left, top, _, bottom) = options.margin;
        let plot = options.plot_size();
        let center_x = left + plot.0 / 2.0;

        context.set_source_rgb(0.0, 0.0, 0.0);
        if let Some(title) = &self.title {
            context.set_font_size(22.0);
            context.show_text_align(title, (center_x, top / 2.0), (0.5, 0.5))?;
        }

        context.set_font_size(18.0);
        context.show_text_align(
            VARIABLE,
            (center_x, options.canvas_size.1 as f64 - bottom / 4.0),
            (0.5, 0.0),
        )?;
        context.show_text_vertical("f(x)", (left / 4.0, top + plot.1 / 2.0))?;

        Ok(())
    }
}

/// Draw grid lines and their tick labels.
fn draw_grid(context: &Context, options: &GraphOptions) -> Result<(), Error> {
    let (left, top, _, _) = options.margin;
    let plot = options.plot_size();
    let (right, bottom) = (left + plot.0, top + plot.1);
    let padding = 8.0;

    context.set_line_width(1.0);
    context.set_font_size(14.0);

    // vertical grid lines (x = ...)
    let (x_ticks, x_step) = ticks::ticks(options.x_bounds(), 10);
    for x in x_ticks {
        let x_canvas = options.x_to_canvas(x);
        context.set_source_rgba(0.5, 0.5, 0.5, options.grid_opacity);
        context.move_to(x_canvas, top);
        context.line_to(x_canvas, bottom);
        context.stroke()?;

        context.set_source_rgb(0.0, 0.0, 0.0);
        context.show_text_align(&ticks::format_tick(x, x_step), (x_canvas, bottom + padding), (0.5, 1.0))?;
    }

    // horizontal grid lines (y = ...)
    let (y_ticks, y_step) = ticks::ticks(options.y_bounds(), 8);
    for y in y_ticks {
        let y_canvas = options.y_to_canvas(y);
        context.set_source_rgba(0.5, 0.5, 0.5, options.grid_opacity);
        context.move_to(left, y_canvas);
        context.line_to(right, y_canvas);
        context.stroke()?;

        context.set_source_rgb(0.0, 0.0, 0.0);
        context.show_text_align(&ticks::format_tick(y, y_step), (left - padding, y_canvas), (1.0, 0.5))?;
    }

    Ok(())
}

/// Draw the axes through the origin, if they are within the plot area.
fn draw_origin_axes(context: &Context, options: &GraphOptions) -> Result<(), Error> {
    let (left, top, _, _) = options.margin;
    let plot = options.plot_size();
    let origin = options.to_canvas(GraphPoint(0.0, 0.0));

    context.set_source_rgb(0.0, 0.0, 0.0);
    context.set_line_width(1.0);

    // vertical axis (x = 0)
    if origin.0 >= left && origin.0 <= left + plot.0 {
        context.move_to(origin.0, top);
        context.line_to(origin.0, top + plot.1);
        context.stroke()?;
    }

    // horizontal axis (y = 0)
    if origin.1 >= top && origin.1 <= top + plot.1 {
        context.move_to(left, origin.1);
        context.line_to(left + plot.0, origin.1);
        context.stroke()?;
    }

    Ok(())
}

/// Draw the border of the plot area.
fn draw_frame(context: &Context, options: &GraphOptions) -> Result<(), Error> {
    let (left, top, _, _) = options.margin;
    let plot = options.plot_size();

    context.set_source_rgb(0.0, 0.0, 0.0);
    context.set_line_width(1.0);
    context.rectangle(left, top, plot.0, plot.1);
    context.stroke()
}

/// Draw the sampled curves, clipped to the plot area.
fn draw_curves(
    context: &Context,
    options: &GraphOptions,
    sampled: &[Vec<Segment>],
) -> Result<(), Error> {
    let (left, top, _, _) = options.margin;
    let plot = options.plot_size();

    context.save()?;
    context.rectangle(left, top, plot.0, plot.1);
    context.clip();
    context.set_line_width(2.0);

    for (index, segments) in sampled.iter().enumerate() {
        let (r, g, b) = curve_color(index);
        context.set_source_rgb(r, g, b);

        for segment in segments {
            let mut points = segment.iter().map(|point| options.to_canvas(*point));
            if let Some(first) = points.next() {
                context.move_to(first.0, first.1);
                for point in points {
                    context.line_to(point.0, point.1);
                }
            }
            context.stroke()?;
        }
    }

    context.restore()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn split_at_top_level_commas() {
        assert_eq!(split_top_level("x^2, sin(x)"), vec!["x^2", "sin(x)"]);
        assert_eq!(split_top_level("f(a, b), [1, 2],x"), vec!["f(a, b)", "[1, 2]", "x"]);
        assert_eq!(split_top_level(" , "), Vec::<&str>::new());
    }

    #[test]
    fn curve_colors() {
        assert_eq!(curve_color(0), BLUE);
        assert_eq!(curve_color(1), PALETTE[1]);
        assert_eq!(curve_color(11), PALETTE[1]);
    }

    #[test]
    fn png_signature() {
        let png = Graph::new()
            .try_add_expr("x^2").unwrap()
            .title("f(x) = x^2")
            .to_png()
            .unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE[..]);
    }

    #[test]
    fn canvas_size() {
        let surface = Graph::new()
            .try_add_exprs("sin(x), cos(x), 1/x").unwrap()
            .draw()
            .unwrap();
        assert_eq!((surface.width(), surface.height()), (1000, 600));
    }

    #[test]
    fn flat_line() {
        assert!(Graph::new().try_add_expr("5").unwrap().to_png().is_ok());
    }

    #[test]
    fn errors() {
        assert!(matches!(Graph::new().draw(), Err(GraphError::NoExpressions)));
        assert!(matches!(Graph::new().try_add_expr("x^"), Err(GraphError::Parse { .. })));
        assert!(matches!(
            Graph::new().try_add_expr("sqrt(-1 - x^2)").unwrap().draw(),
            Err(GraphError::NoFiniteSamples),
        ));
    }
}
