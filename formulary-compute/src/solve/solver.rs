use crate::expr::{Expr, SeqOp, Sequence};
use crate::step_collector::StepCollector;
use replace_with::replace_with_or_abort;
use std::collections::HashSet;
use super::{step::Step, Equation, Unsolvable};

/// The progress of an [`EquationSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveState {
    /// More steps may be taken.
    Solving,

    /// The left-hand side is exactly the target variable.
    Solved,

    /// No further step applies.
    Unsolvable(Unsolvable),
}

/// Isolates a variable on the left-hand side of an equation, one step at a time.
///
/// Each step looks at the kind of the left-hand side. If it is a sum or product with exactly one
/// term containing the variable, every other term is moved to the right-hand side with its
/// operation inverted, and the left-hand side becomes that term. Any other left-hand side ends the
/// solve, either because the variable is isolated or because no rewrite is known.
///
/// The solver owns both sides. Every step builds a new right-hand side, so nothing is shared with
/// the equation it was created from.
#[derive(Debug, Clone)]
pub struct EquationSolver {
    lhs: Expr,
    rhs: Expr,
    target: String,
    variables: HashSet<String>,
    state: SolveState,
}

impl EquationSolver {
    /// Creates a solver for `lhs = rhs` that isolates the given variable on the left-hand side.
    ///
    /// Only terms without the variable and without any unbound variable can be moved to the
    /// right-hand side. Bind values to the other variables first to make their terms movable.
    ///
    /// The caller is responsible for putting the side that contains the variable on the left; see
    /// [`Equation::solve`].
    pub fn new(lhs: Expr, rhs: Expr, variable: &str) -> Self {
        let state = if lhs.is_variable_named(variable) {
            SolveState::Solved
        } else {
            SolveState::Solving
        };

        let mut variables = lhs.unbound_variables().into_iter().collect::<HashSet<_>>();
        variables.insert(variable.to_string());

        Self {
            lhs,
            rhs,
            target: variable.to_string(),
            variables,
            state,
        }
    }

    /// Returns the current left-hand side.
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    /// Returns the current right-hand side.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// Returns the current state.
    pub fn state(&self) -> &SolveState {
        &self.state
    }

    /// Returns true unless the solver has reached a dead end.
    pub fn is_solvable(&self) -> bool {
        !matches!(self.state, SolveState::Unsolvable(_))
    }

    /// Returns true if the variable has been isolated.
    pub fn is_solved(&self) -> bool {
        matches!(self.state, SolveState::Solved)
    }

    fn fail(&mut self, reason: Unsolvable) {
        log::trace!("cannot isolate `{}` in `{} = {}`: {}", self.target, self.lhs, self.rhs, reason);
        self.state = SolveState::Unsolvable(reason);
    }

    /// Returns the index of the only term of the sequence that cannot be moved.
    fn dependent_term(&self, seq: &Sequence) -> Result<usize, Unsolvable> {
        let dependent = seq.terms()
            .iter()
            .enumerate()
            .filter(|(_, term)| !term.expr.is_constant(&self.variables))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        match dependent.as_slice() {
            [] => Err(Unsolvable::NoDependentTerm),
            [index] => Ok(*index),
            _ => Err(Unsolvable::MultipleTerms(dependent.len())),
        }
    }

    /// Takes a single step. Does nothing if the solver is no longer solving.
    pub fn step(&mut self, steps: &mut dyn StepCollector<Step>) {
        if self.state != SolveState::Solving {
            return;
        }

        let dependent = match &self.lhs {
            Expr::Variable(var) => {
                if var.name == self.target {
                    log::trace!("isolated `{}`", self.target);
                    self.state = SolveState::Solved;
                } else {
                    let name = var.name.clone();
                    self.fail(Unsolvable::OtherVariable(name));
                }
                return;
            },
            Expr::Constant(_) => return self.fail(Unsolvable::ConstantSide),
            Expr::Add(seq) | Expr::Mul(seq) => self.dependent_term(seq),
            Expr::Exp(_, _) | Expr::Call(_, _) => Err(Unsolvable::NoInverse(self.lhs.kind())),
            Expr::Placeholder(name) => Err(Unsolvable::Placeholder(name.clone())),
        };

        match dependent {
            Ok(index) => self.isolate(index, steps),
            Err(reason) => self.fail(reason),
        }
    }

    /// Moves every term of the left-hand side sequence except the one at `index` to the right-hand
    /// side, and replaces the left-hand side with that term.
    fn isolate(&mut self, index: usize, steps: &mut dyn StepCollector<Step>) {
        let rhs = &mut self.rhs;
        let mut moved = None;

        replace_with_or_abort(&mut self.lhs, |lhs| {
            let (op, seq) = match lhs {
                Expr::Add(seq) => (SeqOp::Add, seq),
                Expr::Mul(seq) => (SeqOp::Mul, seq),
                other => return other,
            };

            let mut terms = seq.into_terms();
            let chosen = terms.remove(index);
            let sign = chosen.sign;

            replace_with_or_abort(rhs, |rhs| {
                let mut new_rhs = Sequence::new(rhs, sign);
                for term in terms {
                    let term_sign = if sign.is_positive() { !term.sign } else { term.sign };
                    new_rhs.add(term.expr, term_sign);
                }
                op.wrap(new_rhs)
            });

            moved = Some(Step::moving(op, sign));
            chosen.expr
        });

        if let Some(step) = moved {
            log::debug!("{:?}: {} = {}", step, self.lhs, self.rhs);
            steps.push(step);
        }
    }

    /// Takes steps until the variable is isolated or no step applies, returning the solved
    /// equation.
    pub fn solve(mut self, steps: &mut dyn StepCollector<Step>) -> Result<Equation, Unsolvable> {
        loop {
            match self.state {
                SolveState::Solving => self.step(steps),
                SolveState::Solved => return Ok(Equation::new(self.lhs, self.rhs)),
                SolveState::Unsolvable(reason) => return Err(reason),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::{NodeKind, Sign::{Negative, Positive}};
    use crate::func::Func;
    use super::*;

    fn c(value: f64) -> Expr {
        Expr::Constant(value)
    }

    fn x() -> Expr {
        Expr::variable("x")
    }

    #[test]
    fn already_solved() {
        let solver = EquationSolver::new(x(), c(3.0), "x");
        assert!(solver.is_solved());
        assert!(solver.is_solvable());
    }

    #[test]
    fn single_step() {
        let lhs = Expr::addition(x(), Positive, c(5.0), Positive);
        let mut solver = EquationSolver::new(lhs, c(12.0), "x");
        assert_eq!(solver.state(), &SolveState::Solving);

        let mut steps = Vec::new();
        solver.step(&mut steps);
        assert_eq!(solver.lhs(), &x());
        assert_eq!(solver.rhs(), &Expr::addition(c(12.0), Positive, c(5.0), Negative));
        assert_eq!(steps, vec![Step::MoveTerms]);

        // the variable is only recognized as isolated on the next step
        assert!(!solver.is_solved());
        solver.step(&mut steps);
        assert!(solver.is_solved());
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn negative_term() {
        // 5 - x = 12  =>  x = -(12) + (5)
        let lhs = Expr::addition(c(5.0), Positive, x(), Negative);
        let mut steps = Vec::new();
        let solved = EquationSolver::new(lhs, c(12.0), "x").solve(&mut steps).unwrap();
        assert_eq!(solved.rhs.to_string(), "-(12)+(5)");
        assert_eq!(solved.rhs.value().unwrap(), -7.0);
        assert_eq!(steps, vec![Step::MoveTermsNegated]);
    }

    #[test]
    fn divided_by_variable() {
        // 6 / x = 2  =>  x = /(2)*(6)
        let lhs = Expr::multiplication(c(6.0), Positive, x(), Negative);
        let mut steps = Vec::new();
        let solved = EquationSolver::new(lhs, c(2.0), "x").solve(&mut steps).unwrap();
        assert_eq!(solved.rhs.to_string(), "/(2)*(6)");
        assert_eq!(solved.rhs.value().unwrap(), 3.0);
        assert_eq!(steps, vec![Step::MoveFactorsReciprocal]);
    }

    #[test]
    fn other_variable() {
        let mut solver = EquationSolver::new(Expr::variable("y"), c(1.0), "x");
        solver.step(&mut ());
        assert!(!solver.is_solvable());
        assert_eq!(solver.state(), &SolveState::Unsolvable(Unsolvable::OtherVariable("y".to_string())));
    }

    #[test]
    fn constant_lhs() {
        let solver = EquationSolver::new(c(1.0), c(1.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::ConstantSide));
    }

    #[test]
    fn placeholder_lhs() {
        let solver = EquationSolver::new(Expr::placeholder("p"), c(1.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::Placeholder("p".to_string())));
    }

    #[test]
    fn no_inverse() {
        let solver = EquationSolver::new(Expr::call(Func::Ln, x()), c(1.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::NoInverse(NodeKind::Function)));

        let solver = EquationSolver::new(Expr::power(c(2.0), x()), c(8.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::NoInverse(NodeKind::Exponentiation)));
    }

    #[test]
    fn no_dependent_term() {
        let lhs = Expr::addition(c(1.0), Positive, Expr::placeholder("p"), Positive);
        let solver = EquationSolver::new(lhs, c(1.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::NoDependentTerm));
    }

    #[test]
    fn unbound_term_is_not_movable() {
        let lhs = Expr::addition(x(), Positive, Expr::variable("y"), Positive);
        let solver = EquationSolver::new(lhs.clone(), c(1.0), "x");
        assert_eq!(solver.solve(&mut ()), Err(Unsolvable::MultipleTerms(2)));

        let mut lhs = lhs;
        lhs.set_variable("y", 0.25);
        let solved = EquationSolver::new(lhs, c(1.0), "x").solve(&mut ()).unwrap();
        assert_eq!(solved.rhs.to_string(), "(1)-(y)");
        assert_eq!(solved.rhs.value().unwrap(), 0.75);
    }

    #[test]
    fn bound_target_is_still_isolated() {
        let mut lhs = Expr::addition(x(), Positive, c(1.0), Positive);
        lhs.set_variable("x", 100.0);
        let solved = EquationSolver::new(lhs, c(3.0), "x").solve(&mut ()).unwrap();
        assert!(solved.lhs.is_variable_named("x"));
        assert_eq!(solved.rhs.value().unwrap(), 2.0);
    }

    #[test]
    fn stepping_after_terminal_state_does_nothing() {
        let mut solver = EquationSolver::new(c(1.0), c(2.0), "x");
        solver.step(&mut ());
        let state = solver.state().clone();
        solver.step(&mut ());
        assert_eq!(solver.state(), &state);
        assert_eq!(solver.lhs(), &c(1.0));
        assert_eq!(solver.rhs(), &c(2.0));
    }

    #[test]
    fn depth_decreases_every_step() {
        // ((x * 2) + 1) * 3 = 21
        let lhs = Expr::multiplication(
            Expr::addition(
                Expr::multiplication(x(), Positive, c(2.0), Positive),
                Positive,
                c(1.0),
                Positive,
            ),
            Positive,
            c(3.0),
            Positive,
        );
        let mut solver = EquationSolver::new(lhs, c(21.0), "x");
        let mut depth = solver.lhs().depth();
        while !solver.is_solved() {
            solver.step(&mut ());
            assert!(solver.is_solvable());
            assert!(solver.lhs().depth() <= depth);
            depth = solver.lhs().depth();
        }
        assert_eq!(solver.rhs().value().unwrap(), 3.0);
    }
}
