#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod vecset;

pub use vecset::*;
