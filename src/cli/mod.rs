mod commands;
mod menu;
mod session;

pub use commands::{Cli, Commands};
pub use menu::{select_unit, Menu};
pub use session::Session;
