//! Signed term lists shared by [`Expr::Add`] and [`Expr::Mul`].

use std::ops::Not;
use super::{Expr, NodeKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The polarity of a term in a [`Sequence`].
///
/// In a sum, a negative term is subtracted; in a product, a negative term divides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Returns true if the sign is [`Sign::Positive`].
    pub fn is_positive(self) -> bool {
        matches!(self, Sign::Positive)
    }

    /// Returns true if the sign is [`Sign::Negative`].
    pub fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }
}

impl Not for Sign {
    type Output = Sign;

    fn not(self) -> Self::Output {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

impl From<bool> for Sign {
    /// `true` is [`Sign::Positive`].
    fn from(positive: bool) -> Self {
        if positive {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// The operation a [`Sequence`] folds its terms with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqOp {
    /// Terms are added or subtracted.
    Add,

    /// Terms are multiplied or divided.
    Mul,
}

impl SeqOp {
    /// Returns the separators used to render positive and negative terms, respectively.
    pub fn separators(self) -> (&'static str, &'static str) {
        match self {
            SeqOp::Add => ("+", "-"),
            SeqOp::Mul => ("*", "/"),
        }
    }

    /// Returns the value the fold starts from.
    pub fn identity(self) -> f64 {
        match self {
            SeqOp::Add => 0.0,
            SeqOp::Mul => 1.0,
        }
    }

    /// Combines the accumulated value with the value of one term.
    ///
    /// Dividing by a zero-valued term is not guarded, and produces an infinity or NaN.
    pub fn apply(self, acc: f64, sign: Sign, value: f64) -> f64 {
        match (self, sign) {
            (SeqOp::Add, Sign::Positive) => acc + value,
            (SeqOp::Add, Sign::Negative) => acc - value,
            (SeqOp::Mul, Sign::Positive) => acc * value,
            (SeqOp::Mul, Sign::Negative) => acc / value,
        }
    }

    /// Returns the node kind of an expression built with this operation.
    pub fn kind(self) -> NodeKind {
        match self {
            SeqOp::Add => NodeKind::Addition,
            SeqOp::Mul => NodeKind::Multiplication,
        }
    }

    /// Wraps the sequence in the matching [`Expr`] variant.
    pub fn wrap(self, seq: Sequence) -> Expr {
        match self {
            SeqOp::Add => Expr::Add(seq),
            SeqOp::Mul => Expr::Mul(seq),
        }
    }
}

/// A single signed term of a [`Sequence`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The sign of the term.
    pub sign: Sign,

    /// The term itself.
    pub expr: Expr,
}

impl Term {
    /// Creates a new term.
    pub fn new(expr: Expr, sign: Sign) -> Self {
        Self { sign, expr }
    }
}

/// An ordered list of signed terms.
///
/// The order of the terms only affects how the sequence is rendered; the value is found by folding
/// the terms from left to right.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence {
    terms: Vec<Term>,
}

impl Sequence {
    /// Creates a sequence with a single term.
    pub fn new(expr: Expr, sign: Sign) -> Self {
        Self { terms: vec![Term::new(expr, sign)] }
    }

    /// Creates a sequence with two terms.
    pub fn pair(a: Expr, sign_a: Sign, b: Expr, sign_b: Sign) -> Self {
        Self { terms: vec![Term::new(a, sign_a), Term::new(b, sign_b)] }
    }

    /// Appends a term to the end of the sequence.
    pub fn add(&mut self, expr: Expr, sign: Sign) {
        self.terms.push(Term::new(expr, sign));
    }

    /// Appends a term to the end of the sequence, returning the sequence.
    pub fn with(mut self, expr: Expr, sign: Sign) -> Self {
        self.add(expr, sign);
        self
    }

    /// Returns the terms of the sequence.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the terms of the sequence mutably. Terms cannot be added or removed through this
    /// slice.
    pub fn terms_mut(&mut self) -> &mut [Term] {
        &mut self.terms
    }

    /// Consumes the sequence, returning its terms.
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Folds the values of the terms with the given operation, starting from its identity. The
    /// first error returned by `value` stops the fold.
    pub fn fold<E>(
        &self,
        op: SeqOp,
        mut value: impl FnMut(&Expr) -> Result<f64, E>,
    ) -> Result<f64, E> {
        self.terms.iter().try_fold(op.identity(), |acc, term| {
            Ok(op.apply(acc, term.sign, value(&term.expr)?))
        })
    }
}

impl FromIterator<Term> for Sequence {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}
