// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request signing for the SwitchBot v1.1 API.
//!
//! Each request carries the token, a millisecond timestamp, a nonce and
//! `base64(HMAC-SHA256(secret, token || t || nonce))`. The server checks the
//! timestamp against a freshness window, so a header set is only valid for
//! the request it was computed for.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use ring::hmac;

use crate::config::Credentials;

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json; charset=utf8";

/// Nonce mixed into the signature. Always empty.
pub const NONCE: &str = "";

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `Authorization`: the token, verbatim.
    pub authorization: String,
    /// `t`: the millisecond timestamp.
    pub t: String,
    /// `sign`: base64 HMAC digest.
    pub sign: String,
    /// `nonce`.
    pub nonce: String,
    /// `Content-Type`.
    pub content_type: String,
}

impl SignedHeaders {
    /// Returns the headers as `(name, value)` pairs, in wire order.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Authorization", self.authorization.as_str()),
            ("t", self.t.as_str()),
            ("sign", self.sign.as_str()),
            ("nonce", self.nonce.as_str()),
            ("Content-Type", self.content_type.as_str()),
        ]
    }

    /// Adds the headers to a request.
    #[must_use]
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.pairs()
            .into_iter()
            .fold(request, |req, (name, value)| req.header(name, value))
    }
}

/// Computes [`SignedHeaders`] from a token and secret.
///
/// # Examples
///
/// ```
/// use switchbot_plug::config::Credentials;
/// use switchbot_plug::protocol::Signer;
///
/// let signer = Signer::new(Credentials::new("token", "secret"));
/// let headers = signer.sign_at(1_700_000_000_000);
/// assert_eq!(headers.authorization, "token");
/// assert_eq!(headers.t, "1700000000000");
/// assert_eq!(headers, signer.sign_at(1_700_000_000_000));
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Creates a signer for the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Signs with the current wall-clock time.
    #[must_use]
    pub fn sign(&self) -> SignedHeaders {
        self.sign_at(Utc::now().timestamp_millis())
    }

    /// Signs with an explicit millisecond timestamp.
    #[must_use]
    pub fn sign_at(&self, timestamp_millis: i64) -> SignedHeaders {
        let token = self.credentials.token();
        let t = timestamp_millis.to_string();
        let string_to_sign = format!("{token}{t}{NONCE}");

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.credentials.secret().as_bytes());
        let tag = hmac::sign(&key, string_to_sign.as_bytes());

        SignedHeaders {
            authorization: token.to_string(),
            t,
            sign: STANDARD.encode(tag.as_ref()),
            nonce: NONCE.to_string(),
            content_type: CONTENT_TYPE.to_string(),
        }
    }
}
