// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP-triggered plug actions for embedding in a host server.
//!
//! The host owns routing and settings. It registers the three routes through
//! its [`Router`] implementation and forwards matching requests to
//! [`PlugActions::handle`]:
//!
//! | Route | Method | Response body |
//! |-------|--------|---------------|
//! | `/turnon` | POST | `{"power": "on"}` |
//! | `/turnoff` | POST | `{"power": "off"}` |
//! | `/status` | GET | [`PlugStatus`](crate::response::PlugStatus) |
//!
//! # Examples
//!
//! ```no_run
//! use switchbot_plug::action::{Action, PlugActions};
//! use switchbot_plug::config::MemoryConfigStore;
//!
//! # async fn example() {
//! let store = MemoryConfigStore::new()
//!     .with("token", "token")
//!     .with("secret", "secret")
//!     .with("device_id", "6055f92a1b2c");
//!
//! let actions = PlugActions::new(store);
//! let response = actions.handle(Action::Status).await;
//! println!("{} {}", response.status, response.body);
//! # }
//! ```

mod response;

pub use response::ActionResponse;

use std::fmt;

use crate::config::{ConfigStore, PlugSettings};
use crate::error::Result;
use crate::protocol::{ApiConfig, SwitchBotClient};
use crate::types::DeviceId;

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the externally triggered operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Switch the plug on.
    TurnOn,
    /// Switch the plug off.
    TurnOff,
    /// Query the plug's telemetry.
    Status,
}

impl Action {
    /// All actions, in registration order.
    pub const ALL: [Self; 3] = [Self::TurnOn, Self::TurnOff, Self::Status];

    /// Route path, relative to wherever the host mounts the plugin.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::TurnOn => "/turnon",
            Self::TurnOff => "/turnoff",
            Self::Status => "/status",
        }
    }

    /// Route method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::TurnOn | Self::TurnOff => HttpMethod::Post,
            Self::Status => HttpMethod::Get,
        }
    }

    /// Finds the action served at `path` with `method`.
    #[must_use]
    pub fn from_route(method: HttpMethod, path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.method() == method && action.path() == path)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TurnOn => "turnon",
            Self::TurnOff => "turnoff",
            Self::Status => "status",
        })
    }
}

/// Route registration, implemented by the host server.
pub trait Router {
    /// Registers `action` under `path` for `method`.
    fn register(&mut self, path: &str, method: HttpMethod, action: Action);
}

/// Registers every [`Action`] with the host router.
pub fn register_routes<R: Router + ?Sized>(router: &mut R) {
    for action in Action::ALL {
        tracing::debug!(path = action.path(), method = %action.method(), "Registering route");
        router.register(action.path(), action.method(), action);
    }
}

/// Handlers for the three plug actions.
///
/// Settings are read from the store on every call and a new client is built
/// for each request, so settings changes apply immediately.
#[derive(Debug)]
pub struct PlugActions<S> {
    store: S,
    api: ApiConfig,
}

impl<S: ConfigStore> PlugActions<S> {
    /// Creates handlers reading settings from `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            api: ApiConfig::new(),
        }
    }

    /// Overrides the API endpoint configuration.
    #[must_use]
    pub fn with_api_config(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Returns the settings store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles `POST /turnon`.
    ///
    /// # Errors
    ///
    /// Returns any error from reading settings or from the API call.
    pub async fn turn_on(&self) -> Result<ActionResponse> {
        tracing::info!("turnon");
        let (client, device_id) = self.client()?;
        ActionResponse::ok(&client.turn_on(&device_id).await?)
    }

    /// Handles `POST /turnoff`.
    ///
    /// # Errors
    ///
    /// Returns any error from reading settings or from the API call.
    pub async fn turn_off(&self) -> Result<ActionResponse> {
        tracing::info!("turnoff");
        let (client, device_id) = self.client()?;
        ActionResponse::ok(&client.turn_off(&device_id).await?)
    }

    /// Handles `GET /status`.
    ///
    /// # Errors
    ///
    /// Returns any error from reading settings or from the API call.
    pub async fn status(&self) -> Result<ActionResponse> {
        tracing::info!("status");
        let (client, device_id) = self.client()?;
        ActionResponse::ok(&client.status(&device_id).await?)
    }

    /// Runs `action`, propagating failures.
    ///
    /// # Errors
    ///
    /// See the individual handlers.
    pub async fn dispatch(&self, action: Action) -> Result<ActionResponse> {
        match action {
            Action::TurnOn => self.turn_on().await,
            Action::TurnOff => self.turn_off().await,
            Action::Status => self.status().await,
        }
    }

    /// Runs `action`, converting failures into an error response.
    pub async fn handle(&self, action: Action) -> ActionResponse {
        match self.dispatch(action).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(action = %action, error = %err, "Plug action failed");
                ActionResponse::from_error(&err)
            }
        }
    }

    /// Builds a client from the current settings.
    fn client(&self) -> Result<(SwitchBotClient, DeviceId)> {
        let settings = PlugSettings::load(&self.store);
        let device_id = DeviceId::new(&settings.device_id)?;
        let client = self.api.clone().into_client(settings.credentials)?;
        Ok((client, device_id))
    }
}
