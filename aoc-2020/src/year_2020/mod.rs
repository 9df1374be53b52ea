//! Advent of Code 2020

pub mod day_10;
pub mod day_4;
pub mod day_5;
pub mod day_9;
