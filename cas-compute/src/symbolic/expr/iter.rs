use super::{Expr, Primary};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). Function arguments are visited before the call itself.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator starting at the given expression.
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited.map_or(false, |last| std::ptr::eq(last, expr))
    }

    /// Visits the expression on top of the stack if its children have all been visited, otherwise
    /// pushes the children so they are visited first.
    fn visit_or_descend(&mut self, children: &'a [Expr]) -> Option<Option<&'a Expr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let visited = match expr {
                Expr::Primary(Primary::Call(_, arg)) => {
                    self.visit_or_descend(std::slice::from_ref(&**arg))
                },
                Expr::Primary(_) => Some(self.visit()),
                Expr::Add(children) | Expr::Mul(children) => self.visit_or_descend(children),
                Expr::Exp(base, exp) => {
                    if self.is_last_visited(exp) {
                        Some(self.visit())
                    } else {
                        self.stack.push(exp);
                        self.stack.push(base);
                        None
                    }
                },
            };

            if let Some(visited) = visited {
                return visited;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::Func;

    #[test]
    fn visits_children_first() {
        // sin(x) + y^2
        let expr = Expr::Add(vec![
            Expr::call(Func::Sin, Expr::symbol("x")),
            Expr::pow(Expr::symbol("y"), Expr::int(2)),
        ]);
        let order = expr.post_order_iter()
            .map(|expr| match expr {
                Expr::Primary(Primary::Symbol(sym)) => sym.clone(),
                Expr::Primary(Primary::Number(n)) => n.to_string(),
                Expr::Primary(Primary::Call(func, _)) => func.name().to_string(),
                Expr::Exp(..) => "^".to_string(),
                Expr::Add(_) => "+".to_string(),
                _ => "?".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["x", "sin", "y", "2", "^", "+"]);
    }

    #[test]
    fn repeated_subtrees_are_visited_each_time() {
        let x = Expr::symbol("x");
        let expr = Expr::Mul(vec![x.clone(), x.clone(), x]);
        assert_eq!(expr.post_order_iter().count(), 4);
    }
}
