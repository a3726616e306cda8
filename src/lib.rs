// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod board;
pub mod codec;
pub mod config;
pub mod data;
pub mod level;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;
pub mod state;

mod fs;
mod parser;
mod vec2d;

use std::error::Error;

use crate::config::SearchConfig;
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub use crate::parser::ParserErr;
pub use crate::solver::{solve, solve_with_config, Outcome, StopReason};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, config: &SearchConfig) -> Result<SolverOk, SolverErr>;
}
