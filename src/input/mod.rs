pub mod commands;

pub use commands::{Command, ParseError};
