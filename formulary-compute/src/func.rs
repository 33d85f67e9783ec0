//! Named unary functions that can be applied to an expression.

use crate::error::{UnknownFunction, UnsupportedFunction};
use crate::trig_mode::TrigMode;
use formulary_error::Error;
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Function names that are recognized, but have no evaluation rule. Looking one of these up fails
/// with [`UnsupportedFunction`].
pub const UNSUPPORTED: [&str; 16] = [
    "sec", "cosec", "cot",
    "sinh", "cosh", "tanh", "asinh", "acosh", "atanh",
    "sech", "csch", "coth",
    "log", "log2",
    "erf", "erfc",
];

/// Maps the name of every supported function to its [`Func`].
static FUNCS: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    Func::ALL.iter().map(|func| (func.name(), *func)).collect()
});

/// A unary function with an evaluation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Exp,
    Ln,
}

impl Func {
    /// Every supported function, in table order.
    pub const ALL: [Func; 9] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Asin,
        Func::Acos,
        Func::Atan,
        Func::Sqrt,
        Func::Exp,
        Func::Ln,
    ];

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sqrt => "sqrt",
            Func::Exp => "exp",
            Func::Ln => "ln",
        }
    }

    /// Looks up a function by name, ignoring case.
    ///
    /// Names of functions that are known but cannot be evaluated (see [`UNSUPPORTED`]) are
    /// rejected with [`UnsupportedFunction`]. Any other unknown name is rejected with
    /// [`UnknownFunction`], along with the names of similar supported functions.
    ///
    /// The spans of the returned error point into the given name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        let lower = name.to_lowercase();
        if let Some(func) = FUNCS.get(lower.as_str()) {
            return Ok(*func);
        }

        let spans = vec![0..name.len()];
        if UNSUPPORTED.contains(&lower.as_str()) {
            Err(Error::new(spans, UnsupportedFunction { name: name.to_string() }))
        } else {
            Err(Error::new(spans, UnknownFunction {
                name: name.to_string(),
                suggestions: Func::similar(&lower).into_iter().map(String::from).collect(),
            }))
        }
    }

    /// Returns the names of all supported functions with a name similar to the given name.
    pub fn similar(name: &str) -> Vec<&'static str> {
        Func::ALL
            .iter()
            .map(|func| func.name())
            .filter(|n| levenshtein(n, name) < 2)
            .collect()
    }

    /// Applies the function to the given argument.
    ///
    /// The trigonometric mode controls the unit of the input to `sin`, `cos`, and `tan`, and the
    /// unit of the output of `asin`, `acos`, and `atan`.
    pub fn eval(self, arg: f64, trig_mode: TrigMode) -> f64 {
        match self {
            Func::Sin => trig_mode.to_radians(arg).sin(),
            Func::Cos => trig_mode.to_radians(arg).cos(),
            Func::Tan => trig_mode.to_radians(arg).tan(),
            Func::Asin => trig_mode.from_radians(arg.asin()),
            Func::Acos => trig_mode.from_radians(arg.acos()),
            Func::Atan => trig_mode.from_radians(arg.atan()),
            Func::Sqrt => arg.sqrt(),
            Func::Exp => arg.exp(),
            Func::Ln => arg.ln(),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Func {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Func::from_name(s)
    }
}
