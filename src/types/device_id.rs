// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot device identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identifier of a physical plug, as assigned by SwitchBot.
///
/// SwitchBot ids are the device MAC address without separators. The cloud
/// expects them upper-cased, so the value is normalized at construction and
/// ids differing only by case compare equal.
///
/// # Examples
///
/// ```
/// use switchbot_plug::types::DeviceId;
///
/// let id = DeviceId::new("6055f92a1b2c").unwrap();
/// assert_eq!(id.as_str(), "6055F92A1B2C");
/// assert_eq!(id, DeviceId::new("6055F92A1B2C").unwrap());
///
/// assert!(DeviceId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates a device identifier, upper-casing it.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyDeviceId`] if `id` is empty.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValueError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(ValueError::EmptyDeviceId);
        }
        Ok(Self(id.to_uppercase()))
    }

    /// Returns the normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier percent-encoded for use as a URL path segment.
    #[must_use]
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
