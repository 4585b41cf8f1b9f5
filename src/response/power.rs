// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state returned by a command.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValueError};
use crate::response::Envelope;
use crate::types::PowerState;

/// Power state reported after a `turnOn`/`turnOff` command.
///
/// Keeps the literal string the cloud returned. Serializes as
/// `{"power": "on"}`.
///
/// # Examples
///
/// ```
/// use switchbot_plug::response::PlugPowerState;
/// use switchbot_plug::types::PowerState;
///
/// let state = PlugPowerState::new("on");
/// assert_eq!(state.power(), "on");
/// assert_eq!(state.power_state().unwrap(), PowerState::On);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlugPowerState {
    power: String,
}

/// `body` of a command envelope: `{"items": [{"status": {"power": "on"}}]}`.
#[derive(Debug, Deserialize)]
struct CommandBody {
    items: Vec<CommandItem>,
}

#[derive(Debug, Deserialize)]
struct CommandItem {
    status: PlugPowerState,
}

impl PlugPowerState {
    /// Creates a power state from the vendor string.
    #[must_use]
    pub fn new(power: impl Into<String>) -> Self {
        Self {
            power: power.into(),
        }
    }

    /// Extracts `body.items[0].status.power` from a command envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the body does not have that shape or the
    /// item list is empty.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ParseError> {
        let body: CommandBody = envelope.decode_body("command body")?;
        body.items
            .into_iter()
            .next()
            .map(|item| item.status)
            .ok_or_else(|| ParseError::malformed("command body", "`items` is empty"))
    }

    /// Returns the power string as reported.
    #[must_use]
    pub fn power(&self) -> &str {
        &self.power
    }

    /// Interprets the reported string.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPowerState`] for anything but on/off.
    pub fn power_state(&self) -> Result<PowerState, ValueError> {
        self.power.parse()
    }
}
