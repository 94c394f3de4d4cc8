//! The math engine behind the bot.
//!
//! [`MathBot`] turns message text into at most one [`Reply`]. Each operation parses its argument
//! string, runs the computation, and returns an [`Outcome`]. Every error along the way becomes a
//! [`Failure`], which the formatter reports with a fixed, operation-specific message.

use cas_compute::{
    matrix::{Matrix, MatrixError},
    symbolic::{self, expr::Expr, SymbolicError},
};
use cas_graph::{Graph, GraphError};
use cas_parser::parser::{ast::Expr as AstExpr, Parser};
use std::fmt::{self, Display, Formatter};
use tracing::debug;
use crate::{
    command::{Command, CommandTable, IMPLICIT},
    config::EngineConfig,
    format,
    reply::Reply,
    router::{route, Route},
};

/// The step of an operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// The argument could not be read as an expression.
    Parse,

    /// The computation itself failed.
    Compute,

    /// The result could not be rendered.
    Render,
}

/// Why an operation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub stage: Stage,
    pub detail: String,
}

impl Failure {
    pub fn parse(detail: impl Into<String>) -> Self {
        Self { stage: Stage::Parse, detail: detail.into() }
    }

    pub fn compute(detail: impl Into<String>) -> Self {
        Self { stage: Stage::Compute, detail: detail.into() }
    }

    pub fn render(detail: impl Into<String>) -> Self {
        Self { stage: Stage::Render, detail: detail.into() }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            Stage::Parse => "parse",
            Stage::Compute => "compute",
            Stage::Render => "render",
        };
        write!(f, "{} failed: {}", stage, self.detail)
    }
}

impl From<SymbolicError> for Failure {
    fn from(err: SymbolicError) -> Self {
        Self::compute(err.to_string())
    }
}

impl From<MatrixError> for Failure {
    fn from(err: MatrixError) -> Self {
        match err {
            MatrixError::Element(_) | MatrixError::NotAList => Self::parse(err.to_string()),
            _ => Self::compute(err.to_string()),
        }
    }
}

impl From<GraphError> for Failure {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Parse { input, error } => Self::parse(error.report_to_string("input", &input)),
            GraphError::NoExpressions => Self::parse(err.to_string()),
            GraphError::NoFiniteSamples => Self::compute(err.to_string()),
            GraphError::Draw(_) | GraphError::Encode(_) => Self::render(err.to_string()),
        }
    }
}

/// The successful result of an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    /// The help text.
    Help,

    /// The solutions of an equation, possibly none.
    Solutions(Vec<Expr>),

    /// A rewritten expression: simplified, expanded, factored, differentiated or integrated.
    Expr(Expr),

    /// An encoded PNG.
    Graph(Vec<u8>),

    /// A matrix and its determinant.
    Matrix {
        matrix: Matrix,
        det: Expr,
    },
}

/// The result of running an operation.
pub type Outcome = Result<Output, Failure>;

/// A routed message: the command to run and its argument string.
#[derive(Clone)]
pub struct Request {
    pub command: Command,
    pub args: String,
}

/// Parses the input into an expression. Parse and conversion errors are rendered as plain-text
/// reports pointing into the input.
fn parse(input: &str) -> Result<Expr, Failure> {
    Parser::new(input)
        .try_parse_full::<AstExpr>()
        .and_then(Expr::try_from)
        .map_err(|err| Failure::parse(err.report_to_string("input", input)))
}

/// The bot's dispatcher and the operations it runs.
///
/// A [`MathBot`] holds no state that changes between requests, so one instance can serve any
/// number of requests concurrently.
pub struct MathBot {
    config: EngineConfig,
    commands: CommandTable,
}

impl MathBot {
    /// Creates a bot with the given configuration and the fixed command table.
    pub fn new(config: EngineConfig) -> Self {
        Self { config, commands: CommandTable::default() }
    }

    /// Returns the configuration the bot was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Routes the message text to a request. Returns [`None`] for empty text and for unknown
    /// commands.
    pub fn request(&self, text: &str) -> Option<Request> {
        match route(text) {
            Route::Command { name, args } => {
                let command = self.commands.get(name)?;
                Some(Request { command, args })
            },
            Route::Bare(text) => Some(Request { command: IMPLICIT, args: text.to_string() }),
            Route::Empty => None,
        }
    }

    /// Runs the request and formats its reply. A command given no arguments replies with its
    /// usage string instead of running.
    pub fn dispatch(&self, request: &Request) -> Option<Reply> {
        let Request { command, args } = request;
        if let (Some(usage), true) = (command.usage, args.is_empty()) {
            return Some(Reply::Text(usage.to_string()));
        }

        if command.usage.is_some() {
            debug!(command = command.kind.log_name(), %args, "dispatching");
        }
        let outcome = (command.handler)(self, args);
        format::render(command.kind, args, outcome)
    }

    /// Routes and runs the message text, returning the reply to send, if any.
    pub fn handle(&self, text: &str) -> Option<Reply> {
        let request = self.request(text)?;
        self.dispatch(&request)
    }

    pub fn help(&self, _: &str) -> Outcome {
        Ok(Output::Help)
    }

    /// Solves an equation for the configured variable. With a single `=`, the equation
    /// `left = right` is solved as `left - right = 0`; without one, the expression is solved as
    /// equal to zero.
    pub fn solve(&self, input: &str) -> Outcome {
        let expr = match input.split_once('=') {
            Some((_, right)) if right.contains('=') => {
                return Err(Failure::parse("an equation can only have one `=`"));
            },
            Some((left, right)) => parse(left)? - parse(right)?,
            None => parse(input)?,
        };
        Ok(Output::Solutions(symbolic::solve(&expr, &self.config.var)?))
    }

    /// Simplifies the expression. The rewrite steps taken are logged at `debug` level.
    pub fn simplify(&self, input: &str) -> Outcome {
        let (expr, steps) = symbolic::simplify_with_steps(&parse(input)?);
        debug!(?steps, "simplified {input}");
        Ok(Output::Expr(expr))
    }

    pub fn expand(&self, input: &str) -> Outcome {
        Ok(Output::Expr(symbolic::expand(&parse(input)?)))
    }

    pub fn factor(&self, input: &str) -> Outcome {
        Ok(Output::Expr(symbolic::factor(&parse(input)?)))
    }

    /// Differentiates with respect to the configured variable.
    pub fn differentiate(&self, input: &str) -> Outcome {
        Ok(Output::Expr(symbolic::differentiate(&parse(input)?, &self.config.var)?))
    }

    /// Integrates with respect to the configured variable.
    pub fn integrate(&self, input: &str) -> Outcome {
        Ok(Output::Expr(symbolic::integrate(&parse(input)?, &self.config.var)?))
    }

    /// Plots one or more comma-separated expressions.
    pub fn graph(&self, input: &str) -> Outcome {
        let png = Graph::with_opts(self.config.graph)
            .try_add_exprs(input)?
            .title(format!("f(x) = {input}"))
            .to_png()?;
        Ok(Output::Graph(png))
    }

    /// Reads a matrix from a nested list literal and computes its determinant.
    pub fn matrix(&self, input: &str) -> Outcome {
        let ast = Parser::new(input)
            .try_parse_full::<AstExpr>()
            .map_err(|err| Failure::parse(err.report_to_string("input", input)))?;
        let matrix = Matrix::from_ast(ast)?;
        let det = matrix.det()?;
        Ok(Output::Matrix { matrix, det })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn bot() -> MathBot {
        MathBot::new(EngineConfig::default())
    }

    fn text(input: &str) -> String {
        bot().handle(input)
            .and_then(|reply| reply.as_text().map(str::to_string))
            .unwrap()
    }

    #[test]
    fn usage_without_arguments() {
        assert_eq!(text("/solve"), "Usage: /solve x^2+5x+6=0");
        assert_eq!(text("/graph   "), "Usage: /graph x^2");
        assert_eq!(text("/matrix"), "Usage: /matrix [[1,2],[3,4]]");
    }

    #[test]
    fn help() {
        assert_eq!(text("/start"), format::HELP);
        assert_eq!(text("/help@math_bot"), format::HELP);
    }

    #[test]
    fn solve() {
        assert_eq!(text("/solve x^2+5x+6=0"), "✅ Solutions:\n\n1. x = -3\n2. x = -2\n");
        assert_eq!(text("/solve 2x = 4"), "✅ Solutions:\n\n1. x = 2\n");
        assert_eq!(text("/solve x^2+1"), "✅ Solutions:\n\n1. x = -I\n2. x = I\n");
        assert_eq!(text("/solve y^2 = 1"), "❌ No solution found");
    }

    #[test]
    fn solve_errors() {
        assert_eq!(text("/solve x = 1 = 2"), "❌ Error. Check format.");
        assert_eq!(text("/solve x^"), "❌ Error. Check format.");
    }

    #[test]
    fn simplify() {
        let reply = text("/simplify (x+2)*(x+3)");
        assert_eq!(reply, "✅ Simplified:\n\nInput: (x+2)*(x+3)\nOutput: x**2 + 5*x + 6");
    }

    #[test]
    fn expand_and_factor() {
        assert_eq!(text("/expand (x+1)^3"), "✅ Expanded:\n\nInput: (x+1)^3\nOutput: x**3 + 3*x**2 + 3*x + 1");
        assert_eq!(text("/factor x^2+5x+6"), "✅ Factored:\n\nInput: x^2+5x+6\nOutput: (x + 2)*(x + 3)");
    }

    #[test]
    fn calculus() {
        assert_eq!(text("/diff x^2+3x"), "✅ Derivative:\n\nf(x) = x^2+3x\nf'(x) = 2*x + 3");

        let reply = text("/integrate sin(x)");
        assert!(reply.contains("-cos(x)"));
        assert!(reply.ends_with("+ C"));

        assert_eq!(text("/integrate exp(x^2)"), "❌ Error");
    }

    #[test]
    fn graph() {
        match bot().handle("/graph x^2") {
            Some(Reply::Image { png, caption }) => {
                assert!(!png.is_empty());
                assert_eq!(caption, "✅ Graph: f(x) = x^2");
            },
            other => panic!("expected an image, got {other:?}"),
        }
        assert_eq!(text("/graph x^"), "❌ Error creating graph");
    }

    #[test]
    fn matrix() {
        let reply = text("/matrix [[1,2],[3,4]]");
        assert_eq!(reply, "✅ Matrix:\n\nMatrix([[1, 2], [3, 4]])\n\nSize: 2×2\nDet: -2");
        assert_eq!(text("/matrix [[1,2],[3]]"), "❌ Error");
        assert_eq!(text("/matrix [1, 2]"), "❌ Error");
    }

    #[test]
    fn bare_expressions() {
        assert_eq!(text("x^2+5x+6"), "✅ Simplified:\n\nx^2+5x+6\n= x**2 + 5*x + 6");
        assert_eq!(bot().handle("hello world"), None);
        assert_eq!(bot().handle("   "), None);
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(bot().handle("/unknown x"), None);
        assert_eq!(bot().handle("/SOLVE x=1"), None);
    }

    #[test]
    fn simplify_matches_engine() {
        for input in ["(x+2)*(x+3)", "(1^0)^(3x)", "sin(x)^2 + cos(x)^2", "2x + 3x"] {
            let Ok(Output::Expr(expr)) = bot().simplify(input) else {
                panic!("simplify failed for {input}");
            };
            assert_eq!(expr, symbolic::simplify(&parse(input).unwrap()));
        }
    }

    #[test]
    fn deeply_nested_input_is_a_parse_failure() {
        let tower = format!("x{}", "^x".repeat(2000));
        let parens = format!("{}x{}", "(".repeat(2000), ")".repeat(2000));
        let replies = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let bot = bot();
                (
                    bot.simplify(&tower).map_err(|f| f.stage),
                    bot.handle(&format!("/solve {tower} = 1")),
                    bot.handle(&parens),
                )
            })
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(replies.0, Err(Stage::Parse));
        assert_eq!(replies.1, Some(Reply::Text("❌ Error. Check format.".to_string())));
        assert_eq!(replies.2, None);
    }

    #[test]
    fn failures_by_stage() {
        let bot = bot();
        assert_eq!(bot.solve("x +").map_err(|f| f.stage), Err(Stage::Parse));
        assert_eq!(bot.integrate("exp(x^2)").map_err(|f| f.stage), Err(Stage::Compute));
        assert_eq!(bot.graph("sqrt(-1-x^2)").map_err(|f| f.stage), Err(Stage::Compute));
    }
}
