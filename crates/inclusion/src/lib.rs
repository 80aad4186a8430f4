#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod acceptance;
mod adjacency;
mod antichain;
mod counterexample;
mod inclusion;
mod period;
mod prefix;
mod relation;
mod simulation;
mod worklist;

pub use acceptance::*;
pub use adjacency::*;
pub use antichain::*;
pub use counterexample::*;
pub use inclusion::*;
pub use period::*;
pub use prefix::*;
pub use relation::*;
pub use simulation::*;
