// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the SwitchBot cloud API.
//!
//! - [`Signer`]: computes the per-request authentication headers
//! - [`SwitchBotClient`]: signed requests against the device endpoints

mod http;
mod signer;

pub use http::{ApiConfig, SwitchBotClient};
pub use signer::{CONTENT_TYPE, NONCE, SignedHeaders, Signer};
