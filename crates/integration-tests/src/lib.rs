//! Integration test harness for the Teezy client.
//!
//! Each [`TestBackend`] pairs a mock backend with a temporary data directory,
//! so sessions opened from it persist the cart to real files and talk to the
//! backend over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p teezy-integration-tests
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use secrecy::SecretString;
use serde_json::{Value, json};
use teezy_client::{
    CART_STORAGE_KEY, ClientConfig, FileStore, HostEvent, HostPlatform, KeyValueStore, ShopSession,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the test host hands to the client.
pub const TEST_INIT_DATA: &str = "query_id=AAHdF6IQ&user=%7B%22id%22%3A42%7D&hash=c0ffee";

/// Menu served by [`TestBackend::start`].
#[must_use]
pub fn sample_menu() -> Value {
    json!([
        {"id": 1, "name": "Da Hong Pao", "price": "320.00", "category": "Oolong",
         "description": "Roasted rock oolong"},
        {"id": 2, "name": "Sencha", "price": "90.00", "category": "Green"},
        {"id": 3, "name": "Matcha Latte", "price": "150.00", "category": "Drinks"},
        {"id": 4, "name": "Shu Puer", "price": 210.5, "category": "Puer", "is_available": false}
    ])
}

/// Host double that records what the session asked of it.
#[derive(Debug)]
pub struct RecordingHost {
    token: Option<String>,
    confirm_answer: Mutex<bool>,
    events: Mutex<Vec<HostEvent>>,
    questions: Mutex<Vec<String>>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(token: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            token: token.map(str::to_string),
            confirm_answer: Mutex::new(true),
            events: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
        })
    }

    /// Answer future confirmations with `answer`.
    pub fn answer_confirmations(&self, answer: bool) {
        *self
            .confirm_answer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = answer;
    }

    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Alert texts, in order.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Alert(text) => Some(text),
                HostEvent::Impact => None,
            })
            .collect()
    }

    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HostPlatform for RecordingHost {
    fn session_token(&self) -> Option<SecretString> {
        self.token.clone().map(SecretString::from)
    }

    fn notify(&self, event: HostEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        *self
            .confirm_answer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Mock backend plus a scratch data directory.
pub struct TestBackend {
    pub server: MockServer,
    pub host: Arc<RecordingHost>,
    data_dir: TempDir,
}

impl TestBackend {
    /// Start a backend serving [`sample_menu`] at `GET /api/menu/`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menu/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_menu()))
            .mount(&server)
            .await;

        Self {
            server,
            host: RecordingHost::new(Some(TEST_INIT_DATA)),
            data_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URL is rejected.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_api_base(&format!("{}/api/", self.server.uri()))
            .expect("Mock server URL should be valid");
        config.data_dir = self.data_dir.path().to_path_buf();
        config
    }

    /// Open a fresh session, as a new app launch would.
    #[must_use]
    pub fn session(&self) -> ShopSession<FileStore> {
        ShopSession::from_config(&self.config(), self.host.clone())
    }

    /// Raw persisted cart, if any.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be read.
    #[must_use]
    pub fn persisted_cart(&self) -> Option<String> {
        FileStore::new(self.data_dir.path())
            .get(CART_STORAGE_KEY)
            .expect("Failed to read persisted cart")
    }

    /// Overwrite the persisted cart with raw JSON.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be written.
    pub fn write_persisted_cart(&self, raw: &str) {
        FileStore::new(self.data_dir.path())
            .set(CART_STORAGE_KEY, raw)
            .expect("Failed to write persisted cart");
    }
}
