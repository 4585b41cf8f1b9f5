// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `switchbot_plug` library.
//!
//! Failures fall into four groups: transport problems talking to the
//! SwitchBot cloud, envelopes the cloud rejected, responses that do not match
//! the expected shape, and invalid local values.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The HTTP exchange with the cloud API failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response could not be mapped onto the expected records.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The envelope `message` was not `"success"`.
    ///
    /// The cloud answers unauthorized or malformed requests this way, before
    /// any `statusCode` is meaningful.
    #[error("request rejected by the SwitchBot API: {message}")]
    RemoteRejection {
        /// The envelope `statusCode`, when the rejection carried one.
        status_code: Option<i64>,
        /// The envelope `message`.
        message: String,
    },

    /// The envelope reported a `statusCode` other than 100.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}

impl Error {
    /// Returns the remote error if this is a [`Error::Remote`].
    #[must_use]
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}

/// An envelope whose `statusCode` was not the success code.
///
/// Displays as the envelope `message`, verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    /// The envelope `statusCode`, e.g. 161 (device offline) or 190.
    pub status_code: i64,
    /// The envelope `message`.
    pub message: String,
}

impl RemoteError {
    /// Returns the envelope message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A device identifier was empty.
    #[error("device id is empty")]
    EmptyDeviceId,
}

/// Errors related to the HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing SwitchBot responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response did not match the expected record.
    #[error("malformed {context}: {message}")]
    MalformedResponse {
        /// Which part of the response was being decoded.
        context: String,
        /// Description of the mismatch.
        message: String,
    },
}

impl ParseError {
    /// Creates a [`ParseError::MalformedResponse`].
    #[must_use]
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
