#![doc = include_str!("../README.md")]

pub mod ctxt;
pub mod error;
pub mod expr;
pub mod func;
pub mod solve;
pub mod step_collector;
pub mod trig_mode;

pub use ctxt::Ctxt;
pub use expr::Expr;
pub use func::Func;
pub use solve::{Equation, Unsolvable};
pub use trig_mode::TrigMode;
