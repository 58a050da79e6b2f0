pub mod commands;
pub mod protocol;

pub use commands::{execute, watch};
pub use protocol::{CliCommand, ConnectionTypeRow, ToggleReport};
