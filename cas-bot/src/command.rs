//! The fixed table of bot commands.

use std::collections::HashMap;
use crate::engine::{MathBot, Outcome};

/// The operation a request performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Help,
    Solve,
    Simplify,
    Expand,
    Factor,
    Differentiate,
    Integrate,
    Graph,
    MatrixInfo,

    /// Simplification of a message that is not a command.
    ImplicitSimplify,
}

impl OperationKind {
    /// The name used for this operation in log lines.
    pub fn log_name(self) -> &'static str {
        match self {
            Self::Help => "Help",
            Self::Solve => "Solve",
            Self::Simplify | Self::ImplicitSimplify => "Simplify",
            Self::Expand => "Expand",
            Self::Factor => "Factor",
            Self::Differentiate => "Diff",
            Self::Integrate => "Integrate",
            Self::Graph => "Graph",
            Self::MatrixInfo => "Matrix",
        }
    }
}

/// Runs an operation on the argument string.
pub type Handler = fn(&MathBot, &str) -> Outcome;

/// An entry in the command table.
#[derive(Clone, Copy)]
pub struct Command {
    /// The operation the command performs.
    pub kind: OperationKind,

    /// The reply sent when the command is given no arguments. Commands without a usage string run
    /// regardless.
    pub usage: Option<&'static str>,

    /// The function that performs the operation.
    pub handler: Handler,
}

/// The command run for a message that is not a command.
pub const IMPLICIT: Command = Command {
    kind: OperationKind::ImplicitSimplify,
    usage: None,
    handler: MathBot::simplify,
};

/// Maps command names, without the leading `/`, to their [`Command`].
pub struct CommandTable {
    commands: HashMap<&'static str, Command>,
}

impl Default for CommandTable {
    fn default() -> Self {
        use OperationKind::*;

        let entries: [(&'static str, OperationKind, Option<&'static str>, Handler); 10] = [
            ("start", Help, None, MathBot::help),
            ("help", Help, None, MathBot::help),
            ("solve", Solve, Some("Usage: /solve x^2+5x+6=0"), MathBot::solve),
            ("simplify", Simplify, Some("Usage: /simplify (x+2)*(x+3)"), MathBot::simplify),
            ("expand", Expand, Some("Usage: /expand (x+1)^3"), MathBot::expand),
            ("factor", Factor, Some("Usage: /factor x^2+5x+6"), MathBot::factor),
            ("diff", Differentiate, Some("Usage: /diff x^2+3x"), MathBot::differentiate),
            ("integrate", Integrate, Some("Usage: /integrate sin(x)"), MathBot::integrate),
            ("graph", Graph, Some("Usage: /graph x^2"), MathBot::graph),
            ("matrix", MatrixInfo, Some("Usage: /matrix [[1,2],[3,4]]"), MathBot::matrix),
        ];

        let commands = entries.into_iter()
            .map(|(name, kind, usage, handler)| (name, Command { kind, usage, handler }))
            .collect();
        Self { commands }
    }
}

impl CommandTable {
    /// Looks up a command by its exact name.
    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    /// Returns the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if there are no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_names() {
        let table = CommandTable::default();
        assert_eq!(table.len(), 10);
        assert_eq!(table.get("diff").map(|c| c.kind), Some(OperationKind::Differentiate));
        assert_eq!(table.get("start").and_then(|c| c.usage), None);
        assert!(table.get("Solve").is_none());
        assert!(table.get("solv").is_none());
    }
}
