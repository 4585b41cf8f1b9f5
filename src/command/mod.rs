// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot command definitions.
//!
//! Commands are posted to `/v1.1/devices/{deviceId}/commands` as a JSON body:
//!
//! ```json
//! {"command": "turnOn", "parameter": "default", "commandType": "command"}
//! ```
//!
//! # Examples
//!
//! ```
//! use switchbot_plug::command::{Command, PowerCommand};
//! use switchbot_plug::types::PowerState;
//!
//! let cmd = PowerCommand::new(PowerState::On);
//! assert_eq!(cmd.name(), "turnOn");
//! assert_eq!(cmd.parameter(), "default");
//! ```

mod power;

pub use power::PowerCommand;

use serde::Serialize;

/// Parameter sent with commands that take no argument.
pub const DEFAULT_PARAMETER: &str = "default";

/// Command type for built-in device commands.
pub const COMMAND_TYPE: &str = "command";

/// A command that can be sent to a SwitchBot device.
pub trait Command {
    /// Returns the command name, e.g. `"turnOn"`.
    fn name(&self) -> String;

    /// Returns the command parameter.
    fn parameter(&self) -> String {
        DEFAULT_PARAMETER.to_string()
    }

    /// Returns the command type.
    fn command_type(&self) -> String {
        COMMAND_TYPE.to_string()
    }

    /// Builds the JSON body posted to the commands endpoint.
    fn to_request(&self) -> CommandRequest {
        CommandRequest {
            command: self.name(),
            parameter: self.parameter(),
            command_type: self.command_type(),
        }
    }
}

/// Body of a `POST /devices/{id}/commands` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    /// Command name.
    pub command: String,
    /// Command parameter.
    pub parameter: String,
    /// Command type.
    pub command_type: String,
}

impl CommandRequest {
    /// Creates a request for a named command with the default parameter.
    #[must_use]
    pub fn named(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            parameter: DEFAULT_PARAMETER.to_string(),
            command_type: COMMAND_TYPE.to_string(),
        }
    }
}
