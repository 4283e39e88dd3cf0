//! Host platform backed by the terminal.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;
use teezy_client::{HostEvent, HostPlatform};
use tracing::{debug, warn};

/// Prints alerts to stdout and asks confirmations on stdin.
pub struct TerminalHost {
    token: Option<SecretString>,
    assume_yes: bool,
}

impl TerminalHost {
    pub const fn new(token: Option<SecretString>, assume_yes: bool) -> Self {
        Self { token, assume_yes }
    }
}

impl HostPlatform for TerminalHost {
    fn session_token(&self) -> Option<SecretString> {
        self.token.clone()
    }

    fn notify(&self, event: HostEvent) {
        match event {
            HostEvent::Impact => debug!("haptic impact"),
            HostEvent::Alert(text) => {
                if let Err(e) = writeln!(io::stdout().lock(), "{text}") {
                    warn!(error = %e, "Could not write alert");
                }
            }
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stdout = io::stdout().lock();
        let asked = ask(&mut stdout, message);
        drop(stdout);
        if !asked {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Write the y/N prompt. An unwritable prompt counts as a refusal.
fn ask(out: &mut impl Write, message: &str) -> bool {
    match write!(out, "{message} [y/N] ").and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Could not write confirmation prompt");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
