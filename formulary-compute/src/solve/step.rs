use crate::expr::{SeqOp, Sign};

/// A step taken while isolating a variable.
///
/// In the examples below, `x` is the term containing the variable being solved for, and `a` and
/// `b` do not contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `x + a = b` → `x = b - a`
    MoveTerms,

    /// `a - x = b` → `x = -b + a`
    MoveTermsNegated,

    /// `x * a = b` → `x = b / a`
    MoveFactors,

    /// `a / x = b` → `x = 1/b * a`
    MoveFactorsReciprocal,
}

impl Step {
    /// Returns the step that moves the other terms of a sequence away from the term with the given
    /// sign.
    pub fn moving(op: SeqOp, sign: Sign) -> Self {
        match (op, sign) {
            (SeqOp::Add, Sign::Positive) => Step::MoveTerms,
            (SeqOp::Add, Sign::Negative) => Step::MoveTermsNegated,
            (SeqOp::Mul, Sign::Positive) => Step::MoveFactors,
            (SeqOp::Mul, Sign::Negative) => Step::MoveFactorsReciprocal,
        }
    }
}
