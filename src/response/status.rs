// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status response parsing.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValueError};
use crate::response::Envelope;
use crate::types::PowerState;

/// Telemetry snapshot of a plug, as returned by
/// `GET /v1.1/devices/{deviceId}/status`.
///
/// Field names follow the vendor's camelCase keys in both directions.
///
/// # Examples
///
/// ```
/// use switchbot_plug::response::PlugStatus;
///
/// let json = r#"{
///     "deviceId": "6055F92A1B2C",
///     "deviceType": "Plug Mini (JP)",
///     "hubDeviceId": "6055F92A1B2C",
///     "power": "on",
///     "voltage": 101.4,
///     "weight": 12,
///     "electricityOfDay": 37,
///     "electricCurrent": 3
/// }"#;
/// let status: PlugStatus = serde_json::from_str(json).unwrap();
/// assert_eq!(status.device_type, "Plug Mini (JP)");
/// assert!((status.voltage - 101.4).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugStatus {
    /// Device identifier.
    pub device_id: String,
    /// Device model, e.g. `"Plug Mini (US)"`.
    pub device_type: String,
    /// Identifier of the hub the plug reports through.
    pub hub_device_id: String,
    /// Relay state, `"on"` or `"off"`.
    pub power: String,
    /// Voltage in volts.
    pub voltage: f64,
    /// Current power draw in watts.
    pub weight: i64,
    /// Minutes of use today.
    pub electricity_of_day: i64,
    /// Current in amperes.
    pub electric_current: i64,
}

impl PlugStatus {
    /// Decodes the status payload of a success envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a field is missing or has the wrong type.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ParseError> {
        envelope.decode_body("status body")
    }

    /// Interprets the `power` field.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPowerState`] for anything but on/off.
    pub fn power_state(&self) -> Result<PowerState, ValueError> {
        self.power.parse()
    }
}
