//! A representation of algebraic expressions as trees.
//!
//! An [`Expr`] is a closed set of node kinds: constants, variables, placeholders, signed sums and
//! products ([`Sequence`]s), powers, and unary function calls. Every node exclusively owns its
//! children, so a tree is never shared or cyclic, and [`Clone`] produces a fully independent copy
//! (including the values bound to its variables).
//!
//! Sums and products are **not** flattened or reordered. `x + (y + z)` is an [`Expr::Add`] whose
//! second term is itself an [`Expr::Add`], and terms are rendered in the order they were added.
//!
//! ```
//! use formulary_compute::expr::{Expr, Sign};
//!
//! // x + 5
//! let mut expr = Expr::addition(Expr::variable("x"), Sign::Positive, Expr::Constant(5.0), Sign::Positive);
//! assert_eq!(expr.to_string(), "(x)+(5)");
//! assert!(expr.value().is_err());
//!
//! expr.set_variable("x", 2.0);
//! assert_eq!(expr.value().unwrap(), 7.0);
//! ```

mod eval;
mod fmt;
mod sequence;
mod visit;

use crate::func::Func;
use std::collections::{BTreeSet, HashSet};

pub use fmt::{Latex, LatexFormatter};
pub use sequence::{SeqOp, Sequence, Sign, Term};
pub use visit::Visitor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The kind of an [`Expr`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum NodeKind {
    Variable = 1,
    Constant = 2,
    Addition = 3,
    Multiplication = 4,
    Exponentiation = 5,
    Function = 6,
    Placeholder = 7,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Variable => "variable",
            NodeKind::Constant => "constant",
            NodeKind::Addition => "addition",
            NodeKind::Multiplication => "multiplication",
            NodeKind::Exponentiation => "exponentiation",
            NodeKind::Function => "function call",
            NodeKind::Placeholder => "placeholder",
        };
        f.write_str(name)
    }
}

/// A named symbol, optionally bound to a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// The name of the variable.
    pub name: String,

    /// The value bound to the variable, if any.
    pub value: Option<f64>,
}

impl Variable {
    /// Creates a new unbound variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: None }
    }

    /// Binds a value to the variable, replacing any previous value.
    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    /// Returns true if a value is bound to the variable.
    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

/// An algebraic expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal number.
    Constant(f64),

    /// A variable, such as `x`.
    Variable(Variable),

    /// Terms added to or subtracted from each other.
    Add(Sequence),

    /// Factors multiplied or divided by each other.
    Mul(Sequence),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),

    /// A function applied to a single argument.
    Call(Func, Box<Expr>),

    /// A named hole standing in for an expression. It is always constant and evaluates to 0.
    Placeholder(String),
}

impl Expr {
    /// Creates an unbound [`Expr::Variable`].
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(Variable::new(name))
    }

    /// Creates an [`Expr::Placeholder`].
    pub fn placeholder(name: impl Into<String>) -> Self {
        Expr::Placeholder(name.into())
    }

    /// Creates an [`Expr::Add`] with two terms.
    pub fn addition(a: Expr, sign_a: Sign, b: Expr, sign_b: Sign) -> Self {
        Expr::Add(Sequence::pair(a, sign_a, b, sign_b))
    }

    /// Creates an [`Expr::Mul`] with two factors.
    pub fn multiplication(a: Expr, sign_a: Sign, b: Expr, sign_b: Sign) -> Self {
        Expr::Mul(Sequence::pair(a, sign_a, b, sign_b))
    }

    /// Creates an [`Expr::Exp`].
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Expr::Exp(Box::new(base), Box::new(exponent))
    }

    /// Creates an [`Expr::Call`].
    pub fn call(func: Func, arg: Expr) -> Self {
        Expr::Call(func, Box::new(arg))
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Constant(_) => NodeKind::Constant,
            Expr::Variable(_) => NodeKind::Variable,
            Expr::Add(_) => NodeKind::Addition,
            Expr::Mul(_) => NodeKind::Multiplication,
            Expr::Exp(_, _) => NodeKind::Exponentiation,
            Expr::Call(_, _) => NodeKind::Function,
            Expr::Placeholder(_) => NodeKind::Placeholder,
        }
    }

    /// If the expression is an [`Expr::Add`] or [`Expr::Mul`], returns its operation and terms.
    pub fn as_sequence(&self) -> Option<(SeqOp, &Sequence)> {
        match self {
            Expr::Add(seq) => Some((SeqOp::Add, seq)),
            Expr::Mul(seq) => Some((SeqOp::Mul, seq)),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Variable`], returns a reference to it.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expr::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Returns true if the expression is exactly the variable with the given name.
    pub fn is_variable_named(&self, name: &str) -> bool {
        self.as_variable().map_or(false, |var| var.name == name)
    }

    /// Returns the immediate children of this node, in order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Constant(_) | Expr::Variable(_) | Expr::Placeholder(_) => Vec::new(),
            Expr::Add(seq) | Expr::Mul(seq) => seq.terms().iter().map(|term| &term.expr).collect(),
            Expr::Exp(base, exp) => vec![&**base, &**exp],
            Expr::Call(_, arg) => vec![&**arg],
        }
    }

    /// Returns the depth of the tree. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children()
            .into_iter()
            .map(Expr::depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns the number of nodes in the tree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children()
            .into_iter()
            .map(Expr::count)
            .sum::<usize>()
    }

    /// Binds the value to every variable in the tree with the given name.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        match self {
            Expr::Variable(var) => {
                if var.name == name {
                    var.set_value(value);
                }
            },
            Expr::Add(seq) | Expr::Mul(seq) => {
                for term in seq.terms_mut() {
                    term.expr.set_variable(name, value);
                }
            },
            Expr::Exp(base, exp) => {
                base.set_variable(name, value);
                exp.set_variable(name, value);
            },
            Expr::Call(_, arg) => arg.set_variable(name, value),
            Expr::Constant(_) | Expr::Placeholder(_) => (),
        }
    }

    /// Returns true if no variable in the tree has a name in the given set.
    ///
    /// This check is purely structural: a variable in the set is not constant even if a value is
    /// bound to it.
    pub fn is_constant(&self, free: &HashSet<String>) -> bool {
        match self {
            Expr::Constant(_) | Expr::Placeholder(_) => true,
            Expr::Variable(var) => !free.contains(&var.name),
            _ => self.children().into_iter().all(|child| child.is_constant(free)),
        }
    }

    /// Returns true if the variable with the given name appears anywhere in the tree.
    pub fn depends_on(&self, name: &str) -> bool {
        !self.is_constant(&HashSet::from([name.to_string()]))
    }

    /// Returns the names of every variable in the tree, sorted and without duplicates.
    pub fn free_variables(&self) -> Vec<String> {
        #[derive(Default)]
        struct Collector(BTreeSet<String>);

        impl Visitor for Collector {
            fn visit_variable(&mut self, var: &Variable) {
                self.0.insert(var.name.clone());
            }
        }

        let mut collector = Collector::default();
        self.accept_recursive(&mut collector);
        collector.0.into_iter().collect()
    }

    /// Returns the names of every variable in the tree with no bound value, sorted and without
    /// duplicates.
    pub fn unbound_variables(&self) -> Vec<String> {
        #[derive(Default)]
        struct Collector(BTreeSet<String>);

        impl Visitor for Collector {
            fn visit_variable(&mut self, var: &Variable) {
                if !var.is_bound() {
                    self.0.insert(var.name.clone());
                }
            }
        }

        let mut collector = Collector::default();
        self.accept_recursive(&mut collector);
        collector.0.into_iter().collect()
    }

    /// Simplifies the expression in the context of its parent.
    ///
    /// No simplification rules are implemented; the expression is returned unchanged.
    pub fn simplify(self, _parent: Option<&Expr>) -> Expr {
        self
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::Variable(var)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn c(value: f64) -> Expr {
        Expr::Constant(value)
    }

    /// `sin(x^2 + 3) / y`
    fn sample() -> Expr {
        Expr::multiplication(
            Expr::call(
                Func::Sin,
                Expr::addition(Expr::power(x(), c(2.0)), Sign::Positive, c(3.0), Sign::Positive),
            ),
            Sign::Positive,
            Expr::variable("y"),
            Sign::Negative,
        )
    }

    fn vars(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn kinds() {
        assert_eq!(c(1.0).kind(), NodeKind::Constant);
        assert_eq!(x().kind(), NodeKind::Variable);
        assert_eq!(Expr::placeholder("p").kind(), NodeKind::Placeholder);
        assert_eq!(sample().kind(), NodeKind::Multiplication);
        assert_eq!(Expr::power(x(), c(2.0)).kind(), NodeKind::Exponentiation);
        assert_eq!(Expr::call(Func::Ln, x()).kind(), NodeKind::Function);
        assert_eq!(NodeKind::Placeholder as u8, 7);
    }

    #[test]
    fn leaf_depth_and_count() {
        for leaf in [c(1.0), x(), Expr::placeholder("p")] {
            assert_eq!(leaf.depth(), 1);
            assert_eq!(leaf.count(), 1);
            assert!(leaf.children().is_empty());
        }
    }

    #[test]
    fn depth_and_count() {
        let expr = sample();
        // mul -> call -> add -> exp -> x
        assert_eq!(expr.depth(), 5);
        // mul, call, add, exp, x, 2, 3, y
        assert_eq!(expr.count(), 8);
    }

    #[test]
    fn count_and_depth_are_recursive() {
        fn check(expr: &Expr) {
            let children = expr.children();
            assert_eq!(expr.count(), 1 + children.iter().map(|c| c.count()).sum::<usize>());
            assert_eq!(expr.depth(), 1 + children.iter().map(|c| c.depth()).max().unwrap_or(0));
            children.into_iter().for_each(check);
        }
        check(&sample());
    }

    #[test]
    fn children_order() {
        let expr = Expr::power(x(), c(2.0));
        assert_eq!(expr.children(), vec![&x(), &c(2.0)]);
    }

    #[test]
    fn constancy() {
        let expr = sample();
        assert!(!expr.is_constant(&vars(&["x"])));
        assert!(!expr.is_constant(&vars(&["y"])));
        assert!(expr.is_constant(&vars(&["z"])));
        assert!(expr.is_constant(&vars(&[])));

        for leaf in [c(4.0), Expr::placeholder("x")] {
            assert!(leaf.is_constant(&vars(&["x", "y"])));
        }
    }

    #[test]
    fn bound_variable_is_not_constant() {
        let mut expr = Expr::addition(x(), Sign::Positive, c(1.0), Sign::Positive);
        expr.set_variable("x", 3.0);
        assert!(!expr.is_constant(&vars(&["x"])));
        assert!(expr.depends_on("x"));
        assert!(!expr.depends_on("y"));
    }

    #[test]
    fn set_variable_everywhere() {
        let mut expr = Expr::addition(x(), Sign::Positive, Expr::power(x(), c(2.0)), Sign::Negative);
        expr.set_variable("x", 4.0);
        expr.set_variable("unused", 1.0);
        assert_eq!(expr.value().unwrap(), 4.0 - 16.0);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = sample();
        original.set_variable("x", 1.0);
        original.set_variable("y", 2.0);

        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.value().unwrap(), original.value().unwrap());

        copy.set_variable("y", 4.0);
        assert_ne!(copy, original);
        assert_eq!(original.value().unwrap(), 4.0_f64.sin() / 2.0);
        assert_eq!(copy.value().unwrap(), 4.0_f64.sin() / 4.0);
    }

    #[test]
    fn clone_preserves_unbound_state() {
        let mut original = Expr::addition(x(), Sign::Positive, Expr::variable("y"), Sign::Positive);
        original.set_variable("x", 1.0);
        let copy = original.clone();
        assert_eq!(copy.children()[0].as_variable().unwrap().value, Some(1.0));
        assert!(!copy.children()[1].as_variable().unwrap().is_bound());
    }

    #[test]
    fn free_variables() {
        let expr = Expr::addition(sample(), Sign::Positive, x(), Sign::Negative);
        assert_eq!(expr.free_variables(), vec!["x".to_string(), "y".to_string()]);
        assert!(c(1.0).free_variables().is_empty());
    }

    #[test]
    fn unbound_variables() {
        let mut expr = Expr::addition(sample(), Sign::Positive, Expr::variable("z"), Sign::Negative);
        assert_eq!(expr.unbound_variables(), vec!["x".to_string(), "y".to_string(), "z".to_string()]);

        expr.set_variable("y", 1.0);
        assert_eq!(expr.unbound_variables(), vec!["x".to_string(), "z".to_string()]);
        assert_eq!(expr.free_variables().len(), 3);
    }

    #[test]
    fn simplify_is_identity() {
        let expr = sample();
        assert_eq!(expr.clone().simplify(None), expr);
    }
}
