//! Kinds of errors that can occur while evaluating an expression or looking up a function.

use ariadne::Fmt;
use formulary_attrs::ErrorKind;
use formulary_error::{ErrorKind, EXPR};

/// A variable was reached during evaluation that has no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this variable"],
    help = format!(
        "to bind it, call: {}",
        format!("set_variable(\"{}\", <value>)", self.name).fg(EXPR),
    ),
)]
pub struct UnboundVariable {
    /// The name of the variable without a value.
    pub name: String,
}

/// The function name is recognized, but there is no rule to evaluate it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function cannot be evaluated", self.name),
    labels = ["this function"],
    help = format!(
        "the supported functions are: {}",
        crate::func::Func::ALL
            .iter()
            .map(|func| format!("`{}`", func.name().fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", ")
    ),
)]
pub struct UnsupportedFunction {
    /// The name of the function.
    pub name: String,
}

/// The function name is not recognized at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "see the documentation for a list of available functions".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}
