//! # ontosat CLI library
//!
//! Argument parsing and the load → saturate → save run behind the `ontosat` binary

pub mod commands;

pub use commands::*;
