//! Reply templates.

use cas_compute::symbolic::expr::Expr;
use tracing::error;
use crate::{
    command::OperationKind,
    engine::{Outcome, Output},
    reply::Reply,
};

/// The reply to `/start` and `/help`.
pub const HELP: &str = "\
🧮 **Math Solver Bot**

📚 Commands:
/solve x^2+5x+6=0 - Solve equation
/simplify (x+2)*(x+3) - Simplify
/expand (x+1)^3 - Expand
/factor x^2+5x+6 - Factor
/diff x^2+3x - Differentiate
/integrate sin(x) - Integrate
/graph x^2 - Plot graph
/matrix [[1,2],[3,4]] - Matrix info

Just type: x^2+5x+6";

/// The reply sent when the operation fails.
fn failure_message(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Solve => "❌ Error. Check format.",
        OperationKind::Graph => "❌ Error creating graph",
        _ => "❌ Error",
    }
}

fn solutions(solutions: &[Expr]) -> String {
    if solutions.is_empty() {
        return "❌ No solution found".to_string();
    }

    let mut text = String::from("✅ Solutions:\n\n");
    for (i, solution) in solutions.iter().enumerate() {
        text.push_str(&format!("{}. x = {}\n", i + 1, solution));
    }
    text
}

/// `Input: ...` / `Output: ...` under a heading.
fn rewritten(heading: &str, input: &str, result: &Expr) -> String {
    format!("✅ {heading}:\n\nInput: {input}\nOutput: {result}")
}

fn success(kind: OperationKind, input: &str, output: Output) -> Reply {
    let text = match output {
        Output::Help => HELP.to_string(),
        Output::Solutions(list) => solutions(&list),
        Output::Graph(png) => {
            return Reply::Image { png, caption: format!("✅ Graph: f(x) = {input}") };
        },
        Output::Matrix { matrix, det } => format!(
            "✅ Matrix:\n\n{matrix}\n\nSize: {}×{}\nDet: {det}",
            matrix.rows(),
            matrix.cols(),
        ),
        Output::Expr(result) => match kind {
            OperationKind::Differentiate => format!("✅ Derivative:\n\nf(x) = {input}\nf'(x) = {result}"),
            OperationKind::Integrate => format!("✅ Integral:\n\nf(x) = {input}\n∫f(x)dx = {result} + C"),
            OperationKind::ImplicitSimplify => format!("✅ Simplified:\n\n{input}\n= {result}"),
            OperationKind::Expand => rewritten("Expanded", input, &result),
            OperationKind::Factor => rewritten("Factored", input, &result),
            _ => rewritten("Simplified", input, &result),
        },
    };
    Reply::Text(text)
}

/// Formats the outcome of an operation on the given input.
///
/// Failures are logged with their detail and replaced by the operation's fixed error message. A
/// bare message that is not a valid expression gets no reply and is not logged.
pub fn render(kind: OperationKind, input: &str, outcome: Outcome) -> Option<Reply> {
    match outcome {
        Ok(output) => Some(success(kind, input, output)),
        Err(_) if kind == OperationKind::ImplicitSimplify => None,
        Err(failure) => {
            error!("{} error: {}", kind.log_name(), failure);
            Some(Reply::Text(failure_message(kind).to_string()))
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Failure;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn no_solutions() {
        let reply = render(OperationKind::Solve, "x^2+1=x^2", Ok(Output::Solutions(Vec::new())));
        assert_eq!(reply, Some(Reply::Text("❌ No solution found".to_string())));
    }

    #[test]
    fn failure_messages() {
        let failure = || Err(Failure::compute("boom"));
        assert_eq!(
            render(OperationKind::Solve, "x", failure()),
            Some(Reply::Text("❌ Error. Check format.".to_string())),
        );
        assert_eq!(
            render(OperationKind::Graph, "x", failure()),
            Some(Reply::Text("❌ Error creating graph".to_string())),
        );
        assert_eq!(
            render(OperationKind::Integrate, "x", failure()),
            Some(Reply::Text("❌ Error".to_string())),
        );
        assert_eq!(render(OperationKind::ImplicitSimplify, "x", failure()), None);
    }

    #[test]
    fn help_lists_every_command() {
        for name in ["/solve", "/simplify", "/expand", "/factor", "/diff", "/integrate", "/graph", "/matrix"] {
            assert!(HELP.contains(name), "help text is missing {name}");
        }
    }
}
