// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `switchbot_plug` - control a SwitchBot smart plug through the SwitchBot
//! cloud API (v1.1).
//!
//! # Supported Features
//!
//! - **Power control**: turn the plug on or off
//! - **Status queries**: power state, voltage, load, daily usage
//! - **Request signing**: HMAC-SHA256 signatures with a millisecond timestamp
//! - **Host integration**: `/turnon`, `/turnoff` and `/status` handlers for
//!   embedding in a host server (e.g. a 3D-printer controller)
//!
//! # Quick Start
//!
//! ## Direct client
//!
//! ```no_run
//! use switchbot_plug::{Credentials, DeviceId, SwitchBotClient};
//!
//! #[tokio::main]
//! async fn main() -> switchbot_plug::Result<()> {
//!     let client = SwitchBotClient::new(Credentials::new("token", "secret"))?;
//!     let plug = DeviceId::new("6055f92a1b2c")?;
//!
//!     client.turn_on(&plug).await?;
//!     let status = client.status(&plug).await?;
//!     println!("{} W at {} V", status.weight, status.voltage);
//!     Ok(())
//! }
//! ```
//!
//! ## Host handlers
//!
//! ```no_run
//! use switchbot_plug::action::{register_routes, Action, HttpMethod, PlugActions, Router};
//! use switchbot_plug::config::MemoryConfigStore;
//!
//! struct Routes(Vec<Action>);
//!
//! impl Router for Routes {
//!     fn register(&mut self, _path: &str, _method: HttpMethod, action: Action) {
//!         self.0.push(action);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut routes = Routes(Vec::new());
//!     register_routes(&mut routes);
//!
//!     let actions = PlugActions::new(MemoryConfigStore::new());
//!     let response = actions.handle(Action::TurnOff).await;
//!     println!("{} {}", response.status, response.body);
//! }
//! ```

pub mod action;
pub mod command;
pub mod config;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

pub use action::{Action, ActionResponse, HttpMethod, PlugActions, Router, register_routes};
pub use command::{Command, CommandRequest, PowerCommand};
pub use config::{ConfigStore, Credentials, MemoryConfigStore, PlugSettings};
pub use error::{Error, ParseError, ProtocolError, RemoteError, Result, ValueError};
pub use protocol::{ApiConfig, SignedHeaders, Signer, SwitchBotClient};
pub use response::{Envelope, PlugPowerState, PlugStatus};
pub use types::{DeviceId, PowerState};
