// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credentials and host-provided settings.
//!
//! The host application owns settings storage. This crate only reads three
//! keys from it, through the [`ConfigStore`] trait, and never writes them.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

/// Settings key holding the API token.
pub const TOKEN_KEY: &str = "token";
/// Settings key holding the API secret.
pub const SECRET_KEY: &str = "secret";
/// Settings key holding the plug's device id.
pub const DEVICE_ID_KEY: &str = "device_id";

/// SwitchBot API credentials, as issued in the SwitchBot app.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a token and secret.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Returns the token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Read access to the host's settings storage.
///
/// Missing keys read as the empty string.
pub trait ConfigStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> String;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
}

/// In-memory [`ConfigStore`], for hosts without their own storage and for
/// tests.
///
/// # Examples
///
/// ```
/// use switchbot_plug::config::{ConfigStore, MemoryConfigStore};
///
/// let store = MemoryConfigStore::new()
///     .with("token", "abc")
///     .with("device_id", "6055f92a1b2c");
/// assert_eq!(store.get("token"), "abc");
/// assert_eq!(store.get("secret"), "");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> String {
        self.values.read().get(key).cloned().unwrap_or_default()
    }
}

/// Snapshot of the three plug settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlugSettings {
    /// API credentials.
    pub credentials: Credentials,
    /// Device id as stored, not yet normalized.
    pub device_id: String,
}

impl PlugSettings {
    /// Reads the settings from a store.
    #[must_use]
    pub fn load<S: ConfigStore + ?Sized>(store: &S) -> Self {
        Self {
            credentials: Credentials::new(store.get(TOKEN_KEY), store.get(SECRET_KEY)),
            device_id: store.get(DEVICE_ID_KEY),
        }
    }
}
