#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod alphabet;
mod automaton;
mod buchi_automaton;
mod buchi_builder;
mod io_ba;
mod lasso;
mod make_total;
mod random_buchi;

pub use alphabet::*;
pub use automaton::*;
pub use buchi_automaton::*;
pub use buchi_builder::*;
pub use io_ba::*;
pub use lasso::*;
pub use make_total::*;
pub use random_buchi::*;
