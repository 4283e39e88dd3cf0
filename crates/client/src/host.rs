//! Host platform capability.
//!
//! The mini-app runs inside a messaging platform that owns the session
//! token, haptic feedback and modal dialogs. The session talks to it only
//! through [`HostPlatform`], so workflows run unchanged under a terminal, a
//! test double, or a real embedding.

use secrecy::SecretString;
use tracing::{debug, info};

/// Something the host should surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Light haptic tap after a cart change.
    Impact,
    /// User-visible message.
    Alert(String),
}

/// Capabilities provided by the embedding host.
pub trait HostPlatform: Send + Sync {
    /// Session token identifying the authenticated user, if available.
    fn session_token(&self) -> Option<SecretString>;

    /// Surface an event to the user.
    fn notify(&self, event: HostEvent);

    /// Ask the user a yes/no question.
    fn confirm(&self, message: &str) -> bool;
}

/// Host with a fixed token and a fixed answer to confirmations.
///
/// Events are written to the log.
#[derive(Clone)]
pub struct StaticHost {
    token: Option<SecretString>,
    confirm_answer: bool,
}

impl StaticHost {
    /// Create a host that confirms every question.
    #[must_use]
    pub const fn new(token: Option<SecretString>) -> Self {
        Self {
            token,
            confirm_answer: true,
        }
    }

    /// Answer every confirmation with `answer`.
    #[must_use]
    pub const fn with_confirm_answer(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }
}

impl std::fmt::Debug for StaticHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticHost")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("confirm_answer", &self.confirm_answer)
            .finish()
    }
}

impl HostPlatform for StaticHost {
    fn session_token(&self) -> Option<SecretString> {
        self.token.clone()
    }

    fn notify(&self, event: HostEvent) {
        match event {
            HostEvent::Impact => debug!("haptic impact"),
            HostEvent::Alert(text) => info!(%text, "host alert"),
        }
    }

    fn confirm(&self, message: &str) -> bool {
        debug!(question = %message, answer = self.confirm_answer, "host confirmation");
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_static_host_token() {
        let host = StaticHost::new(Some(SecretString::from("init-data".to_string())));
        assert_eq!(
            host.session_token().map(|t| t.expose_secret().to_string()),
            Some("init-data".to_string())
        );
        assert!(StaticHost::new(None).session_token().is_none());
    }

    #[test]
    fn test_static_host_confirm_answer() {
        assert!(StaticHost::new(None).confirm("Replace cart?"));
        assert!(!StaticHost::new(None).with_confirm_answer(false).confirm("Replace cart?"));
    }

    #[test]
    fn test_static_host_debug_redacts() {
        let host = StaticHost::new(Some(SecretString::from("init-data".to_string())));
        assert!(!format!("{host:?}").contains("init-data"));
    }
}
