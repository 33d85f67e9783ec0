//! Numerical evaluation of expressions.

use crate::{ctxt::Ctxt, error::UnboundVariable};
use formulary_error::{Error, ErrorKind};
use super::{Expr, SeqOp};

/// An evaluation error, tagged with the pre-order index of the node it came from.
struct NodeError {
    node: usize,
    kind: Box<dyn ErrorKind>,
}

impl Expr {
    /// Evaluates the expression using only the values bound to its variables.
    ///
    /// Returns an [`UnboundVariable`] error if any variable reached during evaluation has no value.
    pub fn value(&self) -> Result<f64, Error> {
        self.eval(&Ctxt::new())
    }

    /// Evaluates the expression. Variables without a bound value are looked up in the context.
    ///
    /// If evaluation fails, the span of the returned [`Error`] points to the failing node in the
    /// plain-text rendering of this expression (see [`Expr::render_spans`]).
    pub fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        self.eval_node(ctxt, &mut 0).map_err(|err| {
            let (_, spans) = self.render_spans();
            Error {
                spans: spans.get(err.node).cloned().into_iter().collect(),
                kind: err.kind,
            }
        })
    }

    /// Evaluates this node. `next` is the pre-order index of this node, and is advanced past every
    /// node that was visited.
    fn eval_node(&self, ctxt: &Ctxt, next: &mut usize) -> Result<f64, NodeError> {
        let node = *next;
        *next += 1;

        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Variable(var) => var.value
                .or_else(|| ctxt.get_var(&var.name))
                .ok_or_else(|| NodeError {
                    node,
                    kind: Box::new(UnboundVariable { name: var.name.clone() }),
                }),
            Expr::Placeholder(_) => Ok(0.0),
            Expr::Add(terms) => terms.fold(SeqOp::Add, |term| term.eval_node(ctxt, next)),
            Expr::Mul(factors) => factors.fold(SeqOp::Mul, |factor| factor.eval_node(ctxt, next)),
            Expr::Exp(base, exponent) => {
                let base = base.eval_node(ctxt, next)?;
                let exponent = exponent.eval_node(ctxt, next)?;
                Ok(base.powf(exponent))
            },
            Expr::Call(func, arg) => Ok(func.eval(arg.eval_node(ctxt, next)?, ctxt.trig_mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_is_relative_eq,
        afe_relative_error_msg,
        assert_float_relative_eq,
    };
    use crate::expr::Sign::{Negative, Positive};
    use crate::func::Func;
    use crate::trig_mode::TrigMode;
    use super::*;

    fn c(value: f64) -> Expr {
        Expr::Constant(value)
    }

    fn x() -> Expr {
        Expr::variable("x")
    }

    #[test]
    fn constants() {
        assert_eq!(Expr::addition(c(3.0), Positive, c(4.0), Positive).value().unwrap(), 7.0);
        assert_eq!(Expr::multiplication(c(6.0), Positive, c(3.0), Negative).value().unwrap(), 2.0);
        assert_eq!(Expr::power(c(2.0), c(3.0)).value().unwrap(), 8.0);
        assert_eq!(Expr::addition(c(3.0), Positive, c(4.0), Negative).value().unwrap(), -1.0);
    }

    #[test]
    fn placeholder_is_zero() {
        let expr = Expr::addition(Expr::placeholder("p"), Positive, c(2.0), Positive);
        assert_eq!(expr.value().unwrap(), 2.0);
    }

    #[test]
    fn functions() {
        let expr = Expr::call(Func::Sqrt, Expr::power(c(3.0), c(2.0)));
        assert_float_relative_eq!(expr.value().unwrap(), 3.0);

        let expr = Expr::call(Func::Ln, Expr::call(Func::Exp, c(2.5)));
        assert_float_relative_eq!(expr.value().unwrap(), 2.5);
    }

    #[test]
    fn trig_mode_from_context() {
        let expr = Expr::call(Func::Sin, c(90.0));
        let ctxt = Ctxt::with_trig_mode(TrigMode::Degrees);
        assert_float_relative_eq!(expr.eval(&ctxt).unwrap(), 1.0);

        let expr = Expr::call(Func::Atan, c(1.0));
        assert_float_relative_eq!(expr.eval(&ctxt).unwrap(), 45.0);
    }

    #[test]
    fn unbound_variable() {
        let expr = Expr::addition(c(3.0), Positive, x(), Positive);
        let err = expr.value().unwrap_err();
        assert_eq!(
            err.kind_as::<UnboundVariable>(),
            Some(&UnboundVariable { name: "x".to_string() }),
        );

        // "(3)+(x)"
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn first_unbound_variable_is_reported() {
        // (y)^((x)*(z))
        let expr = Expr::power(
            Expr::variable("y"),
            Expr::multiplication(x(), Positive, Expr::variable("z"), Positive),
        );
        let mut ctxt = Ctxt::new();
        ctxt.add_var("y", 2.0);

        let err = expr.eval(&ctxt).unwrap_err();
        assert_eq!(err.kind_as::<UnboundVariable>().unwrap().name, "x");
        let (text, _) = expr.render_spans();
        assert_eq!(&text[err.spans[0].clone()], "x");
    }

    #[test]
    fn context_fills_unbound_variables() {
        let expr = Expr::multiplication(x(), Positive, Expr::variable("y"), Negative);
        let ctxt: Ctxt = [("x", 9.0), ("y", 3.0)].into_iter().collect();
        assert_eq!(expr.eval(&ctxt).unwrap(), 3.0);
    }

    #[test]
    fn leaf_binding_wins_over_context() {
        let mut expr = Expr::addition(x(), Positive, c(1.0), Positive);
        expr.set_variable("x", 10.0);
        let ctxt: Ctxt = [("x", 100.0)].into_iter().collect();
        assert_eq!(expr.eval(&ctxt).unwrap(), 11.0);
    }

    #[test]
    fn division_by_zero() {
        let expr = Expr::multiplication(c(1.0), Positive, c(0.0), Negative);
        assert_eq!(expr.value().unwrap(), f64::INFINITY);
    }

    #[test]
    fn report_points_at_variable() {
        let expr = Expr::addition(c(3.0), Positive, x(), Negative);
        let (text, _) = expr.render_spans();
        let err = expr.value().unwrap_err();
        let report = err.report_to_string("expr", &text);
        let report = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(report.contains("`x` has no value"));
        assert!(report.contains("this variable"));
    }
}
