use rug::Complex;
use std::collections::HashMap;

/// A context to use when evaluating an expression, containing the values of the variables used
/// within the expression.
///
/// Constants such as `pi` and `E` are part of the expression itself and do not need to be bound.
#[derive(Debug, Clone, Default)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, Complex>,
}

impl Ctxt {
    /// Creates a new empty context.
    pub fn new() -> Ctxt {
        Ctxt::default()
    }

    /// Creates a context with a single variable bound to the given value.
    pub fn with_var(name: &str, value: Complex) -> Ctxt {
        let mut ctxt = Ctxt::new();
        ctxt.add_var(name, value);
        ctxt
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: Complex) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<&Complex> {
        self.vars.get(name)
    }
}
