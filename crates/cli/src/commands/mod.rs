//! Subcommand implementations.
//!
//! Commands write their results to stdout; logs go to stderr.

pub mod cart;
pub mod favorite;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod promotions;
pub mod terminal;

use std::io::{self, Write};
use std::sync::Arc;

use teezy_client::{ClientConfig, FileStore, ShopSession};

use terminal::TerminalHost;

/// Result of a subcommand.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the session for this invocation, restoring the persisted cart.
pub fn open_session(config: &ClientConfig, assume_yes: bool) -> ShopSession<FileStore> {
    let host = Arc::new(TerminalHost::new(config.init_data.clone(), assume_yes));
    ShopSession::from_config(config, host)
}

/// Locked stdout for command output.
fn out() -> io::StdoutLock<'static> {
    io::stdout().lock()
}

/// Flush after a block of output.
fn finish(mut out: impl Write) -> CommandResult {
    out.flush()?;
    Ok(())
}
