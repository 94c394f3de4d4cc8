use super::expr::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
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

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits a node whose children are `children`, or pushes the children (last child deepest)
    /// if they have not been visited yet.
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
            match expr {
                Expr::Literal(_) => return self.visit(),
                Expr::Paren(paren) => {
                    if self.is_last_visited(&paren.expr) {
                        return self.visit();
                    }
                    self.stack.push(&paren.expr);
                },
                Expr::Call(call) => {
                    if let Some(visited) = self.visit_or_descend(&call.args) {
                        return visited;
                    }
                },
                Expr::List(list) => {
                    if let Some(visited) = self.visit_or_descend(&list.values) {
                        return visited;
                    }
                },
                Expr::Unary(unary) => {
                    if self.is_last_visited(&unary.operand) {
                        return self.visit();
                    }
                    self.stack.push(&unary.operand);
                },
                Expr::Binary(binary) => {
                    if self.is_last_visited(&binary.rhs) {
                        return self.visit();
                    }
                    self.stack.push(&binary.rhs);
                    self.stack.push(&binary.lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::{ast::literal::Literal, Parser};
    use super::*;

    /// Collects the names and numbers visited, in order.
    fn leaves(input: &str) -> Vec<String> {
        let expr = Parser::new(input).try_parse_full::<Expr>().unwrap();
        expr.post_order_iter()
            .filter_map(|expr| match expr {
                Expr::Literal(Literal::Integer(int)) => Some(int.value.clone()),
                Expr::Literal(Literal::Symbol(sym)) => Some(sym.name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn visits_leaves_left_to_right() {
        assert_eq!(leaves("1 + 2 * x - y"), vec!["1", "2", "x", "y"]);
    }

    #[test]
    fn visits_call_and_list_children() {
        assert_eq!(leaves("f(a, b) + [c, [d]]"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn parent_after_children() {
        let expr = Parser::new("-(x)").try_parse_full::<Expr>().unwrap();
        let kinds = expr.post_order_iter()
            .map(|expr| match expr {
                Expr::Literal(_) => "literal",
                Expr::Paren(_) => "paren",
                Expr::Unary(_) => "unary",
                _ => "other",
            })
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec!["literal", "paren", "unary"]);
    }
}
