use crate::func::Func;
use super::{Expr, Sequence, Variable};

/// An operation that can act on each kind of [`Expr`] node without the expression tree knowing
/// about it.
///
/// Every method does nothing by default, so implementors only override the kinds they care
/// about.
pub trait Visitor {
    fn visit_constant(&mut self, _value: f64) {}

    fn visit_variable(&mut self, _var: &Variable) {}

    fn visit_add(&mut self, _terms: &Sequence) {}

    fn visit_mul(&mut self, _factors: &Sequence) {}

    fn visit_exp(&mut self, _base: &Expr, _exponent: &Expr) {}

    fn visit_call(&mut self, _func: Func, _arg: &Expr) {}

    fn visit_placeholder(&mut self, _name: &str) {}
}

impl Expr {
    /// Calls the visitor method matching the kind of this node. Children are not visited.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Expr::Constant(value) => visitor.visit_constant(*value),
            Expr::Variable(var) => visitor.visit_variable(var),
            Expr::Add(terms) => visitor.visit_add(terms),
            Expr::Mul(factors) => visitor.visit_mul(factors),
            Expr::Exp(base, exponent) => visitor.visit_exp(base, exponent),
            Expr::Call(func, arg) => visitor.visit_call(*func, arg),
            Expr::Placeholder(name) => visitor.visit_placeholder(name),
        }
    }

    /// Visits this node, then every child in order (pre-order, depth-first).
    pub fn accept_recursive<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.accept(visitor);
        for child in self.children() {
            child.accept_recursive(visitor);
        }
    }
}
