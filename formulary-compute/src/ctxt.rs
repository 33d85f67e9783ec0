use std::collections::HashMap;
use super::trig_mode::TrigMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A context to use when evaluating an expression, containing values for variables that are not
/// bound directly in the expression tree.
///
/// A value bound on a [`Variable`](crate::expr::Variable) leaf always takes precedence over a value
/// of the same name in the context.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,

    /// The trigonometric mode of the context.
    pub trig_mode: TrigMode,
}

impl Ctxt {
    /// Creates a new empty context, using radians.
    pub fn new() -> Ctxt {
        Ctxt::default()
    }

    /// Creates a new empty context with the given trigonometric mode.
    pub fn with_trig_mode(trig_mode: TrigMode) -> Ctxt {
        Ctxt {
            trig_mode,
            ..Default::default()
        }
    }

    /// Add a variable to the context, replacing any previous value.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Removes a variable from the context, returning its value if it was present.
    pub fn remove_var(&mut self, name: &str) -> Option<f64> {
        self.vars.remove(name)
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Ctxt {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Ctxt {
            vars: iter.into_iter().map(|(name, value)| (name.to_string(), value)).collect(),
            ..Default::default()
        }
    }
}
