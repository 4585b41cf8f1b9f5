// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power control commands.

use crate::command::Command;
use crate::types::PowerState;

/// Command to switch the plug relay on or off.
///
/// # Examples
///
/// ```
/// use switchbot_plug::command::{Command, PowerCommand};
///
/// assert_eq!(PowerCommand::on().name(), "turnOn");
/// assert_eq!(PowerCommand::off().name(), "turnOff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommand {
    state: PowerState,
}

impl PowerCommand {
    /// Creates a command that moves the plug into `state`.
    #[must_use]
    pub const fn new(state: PowerState) -> Self {
        Self { state }
    }

    /// Creates a command to turn the plug on.
    #[must_use]
    pub const fn on() -> Self {
        Self::new(PowerState::On)
    }

    /// Creates a command to turn the plug off.
    #[must_use]
    pub const fn off() -> Self {
        Self::new(PowerState::Off)
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }
}

impl Command for PowerCommand {
    fn name(&self) -> String {
        self.state.command_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_state() {
        assert_eq!(PowerCommand::on().name(), "turnOn");
        assert_eq!(PowerCommand::off().name(), "turnOff");
        assert_eq!(PowerCommand::on().state(), PowerState::On);
    }

    #[test]
    fn uses_default_parameter() {
        let cmd = PowerCommand::off();
        assert_eq!(cmd.parameter(), "default");
        assert_eq!(cmd.command_type(), "command");
    }
}
