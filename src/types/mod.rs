// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for SwitchBot plug control.
//!
//! - [`DeviceId`] - Upper-case normalized device identifier
//! - [`PowerState`] - On/Off state of the plug relay

mod device_id;
mod power;

pub use device_id::DeviceId;
pub use power::PowerState;
