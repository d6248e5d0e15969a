pub mod cli;
pub mod constants;
pub mod settings;

pub use cli::{Cli, Command, LogLevel};
pub use settings::{parse_bool_flag, ConfigError, Settings};
