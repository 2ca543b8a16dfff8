//! CLI subcommand implementations.

pub mod background;
pub mod category;
pub mod effects;
pub mod session;
pub mod status;
pub mod transfer;
mod util;
pub mod watch;
