pub mod commands;
pub mod review;
pub mod serve;
pub mod worker;

pub use commands::{Cli, Commands};
