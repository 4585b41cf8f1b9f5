// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the SwitchBot cloud API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::command::{Command, CommandRequest, PowerCommand};
use crate::config::Credentials;
use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::protocol::Signer;
use crate::response::{Envelope, PlugPowerState, PlugStatus};
use crate::types::DeviceId;

// ============================================================================
// ApiConfig - Where and how to reach the cloud API
// ============================================================================

/// Configuration for the SwitchBot API endpoint.
///
/// # Examples
///
/// ```
/// use switchbot_plug::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new();
/// assert_eq!(config.base_url(), "https://api.switch-bot.com/v1.1");
///
/// let config = ApiConfig::new()
///     .with_host("http://127.0.0.1:8080/")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://127.0.0.1:8080/v1.1");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    host: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Production API host.
    pub const DEFAULT_HOST: &'static str = "https://api.switch-bot.com";
    /// API version path prefix.
    pub const API_VERSION: &'static str = "v1.1";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration pointing at the production API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API host, e.g. for a mock server.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.host.trim_end_matches('/'), Self::API_VERSION)
    }

    /// Creates a [`SwitchBotClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host has no http(s) scheme or the HTTP client
    /// cannot be created.
    pub fn into_client(
        self,
        credentials: Credentials,
    ) -> std::result::Result<SwitchBotClient, ProtocolError> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.host));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(SwitchBotClient {
            base_url: self.base_url(),
            client,
            signer: Signer::new(credentials),
            timeout: self.timeout,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SwitchBotClient
// ============================================================================

/// Client for one set of SwitchBot credentials.
///
/// Every call performs exactly one signed HTTP request; nothing is retried
/// and nothing is cached.
///
/// # Examples
///
/// ```no_run
/// use switchbot_plug::config::Credentials;
/// use switchbot_plug::protocol::SwitchBotClient;
/// use switchbot_plug::types::DeviceId;
///
/// # async fn example() -> switchbot_plug::Result<()> {
/// let client = SwitchBotClient::new(Credentials::new("token", "secret"))?;
/// let plug = DeviceId::new("6055f92a1b2c")?;
///
/// let state = client.turn_on(&plug).await?;
/// println!("plug is {}", state.power());
///
/// let status = client.status(&plug).await?;
/// println!("{} V", status.voltage);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SwitchBotClient {
    base_url: String,
    client: Client,
    signer: Signer,
    timeout: Duration,
}

impl SwitchBotClient {
    /// Creates a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> std::result::Result<Self, ProtocolError> {
        ApiConfig::new().into_client(credentials)
    }

    /// Returns the versioned base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the status endpoint for a device.
    #[must_use]
    pub fn status_url(&self, device_id: &DeviceId) -> String {
        format!("{}/devices/{}/status", self.base_url, device_id.path_segment())
    }

    /// URL of the commands endpoint for a device.
    #[must_use]
    pub fn commands_url(&self, device_id: &DeviceId) -> String {
        format!("{}/devices/{}/commands", self.base_url, device_id.path_segment())
    }

    /// Queries the plug's telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] on transport failure,
    /// [`Error::RemoteRejection`] or [`Error::Remote`] if the envelope
    /// reports a failure, and [`Error::Parse`] if the body does not match
    /// [`PlugStatus`].
    pub async fn status(&self, device_id: &DeviceId) -> Result<PlugStatus> {
        let url = self.status_url(device_id);
        tracing::debug!(url = %url, "Querying device status");

        let envelope = self.execute(self.client.get(&url)).await?;
        Ok(PlugStatus::from_envelope(&envelope)?)
    }

    /// Sends a typed command and returns the validated envelope.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`status`](Self::status), except the body is
    /// not decoded.
    pub async fn send_command<C: Command + Sync>(
        &self,
        device_id: &DeviceId,
        command: &C,
    ) -> Result<Envelope> {
        self.post_command(device_id, &command.to_request()).await
    }

    /// Sends a command by name with the default parameter.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command).
    pub async fn send_raw(&self, device_id: &DeviceId, command: &str) -> Result<Envelope> {
        self.post_command(device_id, &CommandRequest::named(command)).await
    }

    /// Turns the plug on.
    ///
    /// # Errors
    ///
    /// See [`send_command`](Self::send_command); additionally
    /// [`Error::Parse`] if the body lacks `items[0].status.power`.
    pub async fn turn_on(&self, device_id: &DeviceId) -> Result<PlugPowerState> {
        let envelope = self.send_command(device_id, &PowerCommand::on()).await?;
        Ok(PlugPowerState::from_envelope(&envelope)?)
    }

    /// Turns the plug off.
    ///
    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn turn_off(&self, device_id: &DeviceId) -> Result<PlugPowerState> {
        let envelope = self.send_command(device_id, &PowerCommand::off()).await?;
        Ok(PlugPowerState::from_envelope(&envelope)?)
    }

    async fn post_command(
        &self,
        device_id: &DeviceId,
        request: &CommandRequest,
    ) -> Result<Envelope> {
        let url = self.commands_url(device_id);
        let body = serde_json::to_string(request).map_err(ParseError::Json)?;
        tracing::debug!(url = %url, body = %body, "Sending command");

        self.execute(self.client.post(&url).body(body)).await
    }

    /// Signs, sends and validates one request.
    async fn execute(&self, request: RequestBuilder) -> Result<Envelope> {
        // Signed here so the timestamp is taken right before sending.
        let response = self
            .signer
            .sign()
            .apply(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.read_envelope(response).await
    }

    async fn read_envelope(&self, response: Response) -> Result<Envelope> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = status.as_u16(), body = %text, "Received API response");

        match Envelope::parse(&text) {
            Err(Error::Parse(ParseError::Json(_))) if status == StatusCode::UNAUTHORIZED => {
                Err(ProtocolError::AuthenticationFailed.into())
            }
            Err(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
                Err(err)
            }
            ok => ok,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis).into()
        } else {
            ProtocolError::Http(err).into()
        }
    }
}
