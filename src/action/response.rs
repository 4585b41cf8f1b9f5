// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Responses returned to the host server.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{Error, ParseError, ProtocolError, Result};

/// Status code and JSON body for the host to send back.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl ActionResponse {
    /// A `200 OK` response carrying `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if `value` cannot be serialized.
    pub fn ok<T: Serialize>(value: &T) -> Result<Self> {
        let body = serde_json::to_value(value).map_err(ParseError::Json)?;
        Ok(Self {
            status: StatusCode::OK,
            body,
        })
    }

    /// A non-2xx response describing `err` as `{"error": "..."}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchbot_plug::action::ActionResponse;
    /// use switchbot_plug::error::{Error, RemoteError};
    ///
    /// let err: Error = RemoteError { status_code: 161, message: "device offline".into() }.into();
    /// let response = ActionResponse::from_error(&err);
    /// assert_eq!(response.status.as_u16(), 502);
    /// assert_eq!(response.body["error"], "remote error: device offline");
    /// ```
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self {
            status: status_for(err),
            body: json!({ "error": err.to_string() }),
        }
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Remote(_) | Error::RemoteRejection { .. } | Error::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
        Error::Protocol(ProtocolError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        Error::Protocol(ProtocolError::AuthenticationFailed) => StatusCode::UNAUTHORIZED,
        Error::Protocol(ProtocolError::Http(_)) => StatusCode::BAD_GATEWAY,
        Error::Protocol(ProtocolError::InvalidAddress(_)) | Error::Value(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::response::PlugPowerState;

    #[test]
    fn ok_serializes_value() {
        let response = ActionResponse::ok(&PlugPowerState::new("on")).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"power": "on"}));
        assert!(response.is_success());
    }

    #[test]
    fn rejection_is_bad_gateway() {
        let err = Error::RemoteRejection {
            status_code: None,
            message: "Unauthorized".to_string(),
        };
        let response = ActionResponse::from_error(&err);
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert!(!response.is_success());
        assert_eq!(
            response.body["error"],
            "request rejected by the SwitchBot API: Unauthorized"
        );
    }

    #[test]
    fn timeout_is_gateway_timeout() {
        let err: Error = ProtocolError::Timeout(10_000).into();
        assert_eq!(
            ActionResponse::from_error(&err).status,
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn authentication_failure() {
        let err: Error = ProtocolError::AuthenticationFailed.into();
        assert_eq!(
            ActionResponse::from_error(&err).status,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn local_configuration_errors_are_internal() {
        let err: Error = ValueError::EmptyDeviceId.into();
        assert_eq!(
            ActionResponse::from_error(&err).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err: Error = ProtocolError::InvalidAddress("nowhere".to_string()).into();
        assert_eq!(
            ActionResponse::from_error(&err).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
