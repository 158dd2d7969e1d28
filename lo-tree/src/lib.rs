pub mod cli;
pub mod load_config;
pub mod sync;
pub mod writer;

pub use cli::{run, Cli, Commands};
