//! Advent of Code 2020 puzzle solutions
//!
//! Every solver derives `AutoRegisterSolver`, so linking this crate is enough
//! for `SolverRegistryBuilder::register_all_plugins` to find them.

pub mod year_2020;
