//! Isolating a variable in an equation.
//!
//! An [`Equation`] is solved for a variable by repeatedly moving terms that do not contain the
//! variable from one side to the other, inverting their operation:
//!
//! ```
//! use formulary_compute::expr::{Expr, Sign};
//! use formulary_compute::solve::Equation;
//!
//! // x + 5 = 12
//! let equation = Equation::new(
//!     Expr::addition(Expr::variable("x"), Sign::Positive, Expr::Constant(5.0), Sign::Positive),
//!     Expr::Constant(12.0),
//! );
//!
//! let solved = equation.solve("x").unwrap();
//! assert_eq!(solved.to_string(), "x = (12)-(5)");
//! assert_eq!(solved.rhs.value().unwrap(), 7.0);
//! ```
//!
//! This only works when the variable appears in a single term of every sum and product on the way
//! down, and never inside a power or function call. Other terms can only be moved if every
//! variable in them has a bound value. Anything else is reported as [`Unsolvable`].

mod solver;
mod step;

use crate::{ctxt::Ctxt, expr::{Expr, Latex, NodeKind}, step_collector::StepCollector};
use formulary_error::Error;
use std::{collections::HashSet, fmt};

pub use solver::{EquationSolver, SolveState};
pub use step::Step;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The reason a variable could not be isolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsolvable {
    /// Neither side of the equation contains the variable.
    Independent,

    /// Both sides of the equation contain the variable.
    BothSides,

    /// The left-hand side was reduced to a different variable.
    OtherVariable(String),

    /// The left-hand side was reduced to a constant.
    ConstantSide,

    /// Every term of a sum or product can be moved, so none is left to isolate.
    NoDependentTerm,

    /// More than one term of a sum or product contains the variable or an unbound variable.
    MultipleTerms(usize),

    /// The variable is inside a node that has no known inverse, such as a power or function call.
    NoInverse(NodeKind),

    /// The left-hand side was reduced to a placeholder.
    Placeholder(String),
}

impl fmt::Display for Unsolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsolvable::Independent => write!(f, "the variable does not appear in the equation"),
            Unsolvable::BothSides => write!(f, "the variable appears on both sides of the equation"),
            Unsolvable::OtherVariable(name) => write!(f, "the variable `{}` is in the way", name),
            Unsolvable::ConstantSide => write!(f, "the side being solved is constant"),
            Unsolvable::NoDependentTerm => write!(f, "no term contains the variable"),
            Unsolvable::MultipleTerms(count) => {
                write!(f, "{} terms depend on the variable or on unbound variables, but only one may", count)
            },
            Unsolvable::NoInverse(kind) => write!(f, "cannot invert a {}", kind),
            Unsolvable::Placeholder(name) => write!(f, "the placeholder `{}` is in the way", name),
        }
    }
}

/// Two expressions that are equal in value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Expr,

    /// The right-hand side.
    pub rhs: Expr,
}

impl Equation {
    /// Creates a new equation `lhs = rhs`.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }

    /// Binds the value to every variable with the given name on both sides.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.lhs.set_variable(name, value);
        self.rhs.set_variable(name, value);
    }

    /// Solves the equation for the given variable, returning an equation with the variable alone on
    /// the left-hand side.
    ///
    /// Exactly one side must contain the variable. Terms that contain another variable without a
    /// bound value cannot be moved. This equation is left untouched.
    pub fn solve(&self, variable: &str) -> Result<Equation, Unsolvable> {
        self.solve_with_steps(variable, &mut ())
    }

    /// Solves the equation for the given variable, and collects the steps taken into the given
    /// [`StepCollector`].
    pub fn solve_with_steps(
        &self,
        variable: &str,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Equation, Unsolvable> {
        let variables = HashSet::from([variable.to_string()]);
        let (dependent, constant) = match (self.lhs.is_constant(&variables), self.rhs.is_constant(&variables)) {
            (false, true) => (&self.lhs, &self.rhs),
            (true, false) => (&self.rhs, &self.lhs),
            (true, true) => return Err(Unsolvable::Independent),
            (false, false) => return Err(Unsolvable::BothSides),
        };

        log::debug!("solving `{}` for `{}`", self, variable);
        EquationSolver::new(dependent.clone(), constant.clone(), variable).solve(steps)
    }

    /// Evaluates both sides and returns true if they differ by at most `tolerance`.
    pub fn is_satisfied(&self, ctxt: &Ctxt, tolerance: f64) -> Result<bool, Error> {
        let lhs = self.lhs.eval(ctxt)?;
        let rhs = self.rhs.eval(ctxt)?;
        Ok((lhs - rhs).abs() <= tolerance)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs.as_display(), self.rhs.as_display())
    }
}
