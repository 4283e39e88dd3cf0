//! Teezy client.
//!
//! Runs one user's ordering session against the Teezy backend: the menu
//! cache, the persisted cart, order submission, and loyalty features.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use teezy_client::{ClientConfig, ShopSession, StaticHost};
//!
//! let config = ClientConfig::from_env()?;
//! let host = Arc::new(StaticHost::new(config.init_data.clone()));
//! let mut session = ShopSession::from_config(&config, host);
//!
//! session.refresh_catalog().await?;
//! session.add_item(3.into())?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod host;
pub mod session;
pub mod store;

pub use api::{AUTH_HEADER, ApiClient, RequestError};
pub use catalog::CatalogCache;
pub use checkout::SubmitControl;
pub use config::{ClientConfig, ConfigError};
pub use error::{Result, SessionError};
pub use host::{HostEvent, HostPlatform, StaticHost};
pub use session::{FavoriteOutcome, ShopSession};
pub use store::{
    CART_STORAGE_KEY, FileStore, KeyValueStore, LocalCartStore, MemoryStore, PersistenceError,
};
