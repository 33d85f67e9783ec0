use std::fmt::{Display, Formatter, Result};
use std::ops::Range;
use crate::func::Func;
use super::{Expr, SeqOp, Sequence};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

impl Expr {
    /// Renders the expression as plain text, along with the byte range each node occupies in the
    /// text. The ranges are listed in pre-order, matching [`Expr::accept_recursive`].
    ///
    /// The text is identical to the [`Display`] output.
    pub fn render_spans(&self) -> (String, Vec<Range<usize>>) {
        let mut out = String::new();
        let mut spans = Vec::new();
        self.write_plain(&mut out, &mut spans);
        (out, spans)
    }

    fn write_plain(&self, out: &mut String, spans: &mut Vec<Range<usize>>) {
        let index = spans.len();
        spans.push(out.len()..out.len());

        match self {
            Expr::Constant(value) => out.push_str(&value.to_string()),
            Expr::Variable(var) => out.push_str(&var.name),
            Expr::Placeholder(name) => out.push_str(name),
            Expr::Add(terms) => write_sequence(SeqOp::Add, terms, out, spans),
            Expr::Mul(factors) => write_sequence(SeqOp::Mul, factors, out, spans),
            Expr::Exp(base, exponent) => {
                out.push('(');
                base.write_plain(out, spans);
                out.push_str(")^(");
                exponent.write_plain(out, spans);
                out.push(')');
            },
            Expr::Call(func, arg) => {
                out.push_str(func.name());
                out.push('(');
                arg.write_plain(out, spans);
                out.push(')');
            },
        }

        spans[index].end = out.len();
    }
}

/// Writes every term wrapped in parentheses, separated by the operation's separators. The
/// separator before the first term is only written if the term is negative.
fn write_sequence(op: SeqOp, seq: &Sequence, out: &mut String, spans: &mut Vec<Range<usize>>) {
    let (pos_sep, neg_sep) = op.separators();
    for (i, term) in seq.terms().iter().enumerate() {
        if i > 0 || term.sign.is_negative() {
            out.push_str(if term.sign.is_positive() { pos_sep } else { neg_sep });
        }
        out.push('(');
        term.expr.write_plain(out, spans);
        out.push(')');
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut out = String::new();
        self.write_plain(&mut out, &mut Vec::new());
        f.write_str(&out)
    }
}

/// Writes the LaTeX of the expression, wrapping it in the given brackets if `brackets` is true.
fn latex_bracketed(expr: &Expr, brackets: bool, open: &str, close: &str) -> String {
    if brackets {
        format!("{}{}{}", open, expr.as_display(), close)
    } else {
        expr.as_display().to_string()
    }
}

/// A sum is bracketed inside another sum unless it is the leading, positive term.
fn fmt_add(f: &mut Formatter, terms: &Sequence) -> Result {
    for (i, term) in terms.terms().iter().enumerate() {
        let first = i == 0;
        let brackets = matches!(term.expr, Expr::Add(_)) && (!first || term.sign.is_negative());
        if !first || term.sign.is_negative() {
            write!(f, "{}", if term.sign.is_positive() { '+' } else { '-' })?;
        }
        write!(f, "{}", latex_bracketed(&term.expr, brackets, "(", ")"))?;
    }
    Ok(())
}

/// Positive factors form the numerator and negative factors the denominator. Sums are always
/// bracketed.
fn fmt_mul(f: &mut Formatter, factors: &Sequence) -> Result {
    let mut numerator = String::new();
    let mut denominator = String::new();
    for term in factors.terms() {
        let buf = latex_bracketed(&term.expr, matches!(term.expr, Expr::Add(_)), "(", ")");
        if term.sign.is_positive() {
            numerator.push_str(&buf);
        } else {
            denominator.push_str(&buf);
        }
    }

    if numerator.is_empty() {
        numerator.push('1');
    }

    if denominator.is_empty() {
        write!(f, "{}", numerator)
    } else {
        write!(f, "{{{}}}/{{{}}}", numerator, denominator)
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Constant(value) => write!(f, "\\mathrm{{{}}}", value),
            Expr::Variable(var) => write!(f, "{}", var.name),
            Expr::Placeholder(name) => write!(f, "{}", name),
            Expr::Add(terms) => fmt_add(f, terms),
            Expr::Mul(factors) => fmt_mul(f, factors),
            Expr::Exp(base, exponent) => {
                let brackets = !matches!(**base, Expr::Constant(_) | Expr::Variable(_));
                write!(
                    f,
                    "{{{}}}^{{{}}}",
                    latex_bracketed(base, brackets, "\\left(", "\\right)"),
                    exponent.as_display(),
                )
            },
            Expr::Call(func, arg) => match func {
                Func::Exp => write!(f, "e^{{{}}}", arg.as_display()),
                Func::Sqrt => write!(f, "\\sqrt{{{}}}", arg.as_display()),
                _ => write!(f, "\\mathrm{{{}}}\\left({}\\right)", func.name(), arg.as_display()),
            },
        }
    }
}
