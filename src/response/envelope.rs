// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The uniform SwitchBot response wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ParseError, RemoteError};

/// Envelope `message` of an accepted request.
pub const SUCCESS_MESSAGE: &str = "success";

/// Envelope `statusCode` of a successful operation.
pub const SUCCESS_STATUS_CODE: i64 = 100;

/// Wire shape before validation. Every field is optional so that shape
/// problems surface as [`ParseError::MalformedResponse`] instead of a bare
/// serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    status_code: Option<i64>,
    message: Option<String>,
    #[serde(default)]
    body: Value,
}

/// A validated success envelope.
///
/// ```json
/// {"statusCode": 100, "message": "success", "body": { ... }}
/// ```
///
/// # Examples
///
/// ```
/// use switchbot_plug::response::Envelope;
///
/// let envelope = Envelope::parse(r#"{"statusCode":100,"message":"success","body":{}}"#).unwrap();
/// assert_eq!(envelope.status_code(), 100);
///
/// let err = Envelope::parse(r#"{"statusCode":161,"message":"device offline","body":{}}"#);
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    status_code: i64,
    message: String,
    body: Value,
}

impl Envelope {
    /// Parses and validates a raw response body.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Json`] if the text is not JSON
    /// - [`ParseError::MalformedResponse`] if `message` or `statusCode` has the wrong shape
    /// - [`Error::RemoteRejection`] if `message` is not `"success"`
    /// - [`Error::Remote`] if `statusCode` is not 100
    pub fn parse(text: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(text).map_err(ParseError::Json)?;
        Self::from_value(value)
    }

    /// Validates an already decoded response body.
    ///
    /// # Errors
    ///
    /// See [`Envelope::parse`].
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let raw: RawEnvelope = decode(value, "envelope")?;

        let message = raw
            .message
            .ok_or_else(|| ParseError::malformed("envelope", "missing field `message`"))?;
        if message != SUCCESS_MESSAGE {
            return Err(Error::RemoteRejection {
                status_code: raw.status_code,
                message,
            });
        }

        let status_code = raw
            .status_code
            .ok_or_else(|| ParseError::malformed("envelope", "missing field `statusCode`"))?;
        if status_code != SUCCESS_STATUS_CODE {
            return Err(RemoteError {
                status_code,
                message,
            }
            .into());
        }

        Ok(Self {
            status_code,
            message,
            body: raw.body,
        })
    }

    /// Returns the envelope status code.
    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    /// Returns the envelope message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Decodes the payload into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedResponse`] if the envelope carried no
    /// body or the body does not match `T`.
    pub fn decode_body<T: DeserializeOwned>(&self, context: &str) -> Result<T, ParseError> {
        if self.body.is_null() {
            return Err(ParseError::malformed(context, "missing field `body`"));
        }
        decode(self.body.clone(), context)
    }
}

fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, ParseError> {
    serde_json::from_value(value).map_err(|e| ParseError::malformed(context, e.to_string()))
}
