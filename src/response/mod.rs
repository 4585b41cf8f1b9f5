// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for SwitchBot JSON responses.
//!
//! Every SwitchBot response is wrapped in an [`Envelope`]. Once validated,
//! its payload is decoded into one of the value objects below.

mod envelope;
mod power;
mod status;

pub use envelope::{Envelope, SUCCESS_MESSAGE, SUCCESS_STATUS_CODE};
pub use power::PlugPowerState;
pub use status::PlugStatus;
