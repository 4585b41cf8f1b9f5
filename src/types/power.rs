// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug power state.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Power state reported by a SwitchBot plug.
///
/// # Examples
///
/// ```
/// use switchbot_plug::types::PowerState;
///
/// assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
/// assert_eq!(PowerState::Off.as_str(), "off");
/// assert!("dim".parse::<PowerState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the string used by the SwitchBot API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns the name of the command that moves the plug into this state.
    #[must_use]
    pub const fn command_name(&self) -> &'static str {
        match self {
            Self::Off => "turnOff",
            Self::On => "turnOn",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}
