// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor platform configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, ParseError};
use crate::protocol::DeviceEndpoint;

/// Name used when the configuration does not provide one.
pub const DEFAULT_NAME: &str = "Brother QL";

/// Default polling interval.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for one Brother QL sensor.
///
/// Only `host` is required. The configuration is validated once, when the
/// sensor is built.
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::SensorConfig;
///
/// // Programmatic configuration
/// let config = SensorConfig::new("192.168.1.60").with_name("Shipping labels");
/// assert_eq!(config.name, "Shipping labels");
/// assert_eq!(config.port, 161);
///
/// // From the host's JSON configuration block
/// let config = SensorConfig::from_json(r#"{"host": "printer.lan"}"#).unwrap();
/// assert_eq!(config.name, "Brother QL");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Hostname or IP address of the printer.
    pub host: String,
    /// Sensor name shown by the host.
    #[serde(default = "default_name")]
    pub name: String,
    /// SNMP agent port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SNMP read community.
    #[serde(default = "default_community")]
    pub community: String,
    /// Reply timeout in milliseconds; unbounded when absent.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Seconds between polls.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_port() -> u16 {
    DeviceEndpoint::DEFAULT_PORT
}

fn default_community() -> String {
    DeviceEndpoint::DEFAULT_COMMUNITY.to_string()
}

fn default_scan_interval_secs() -> u64 {
    DEFAULT_SCAN_INTERVAL.as_secs()
}

impl SensorConfig {
    /// Creates a configuration for the given host with default settings.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: default_name(),
            port: default_port(),
            community: default_community(),
            timeout_ms: None,
            scan_interval_secs: default_scan_interval_secs(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the JSON is malformed or `host` is missing.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::Json)
    }

    /// Sets the sensor name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the SNMP agent port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the SNMP read community.
    #[must_use]
    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    /// Bounds the wait for each reply.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Sets the polling interval, rounded down to whole seconds.
    #[must_use]
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval_secs = interval.as_secs();
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidConfiguration` if the host is empty or
    /// contains whitespace, the port is 0, or the scan interval is 0.
    pub fn validate(&self) -> Result<(), DeviceError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(DeviceError::InvalidConfiguration(
                "host is required".to_string(),
            ));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(DeviceError::InvalidConfiguration(format!(
                "host must not contain whitespace: {host:?}"
            )));
        }
        if self.port == 0 {
            return Err(DeviceError::InvalidConfiguration(
                "port must be non-zero".to_string(),
            ));
        }
        if self.scan_interval_secs == 0 {
            return Err(DeviceError::InvalidConfiguration(
                "scan interval must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the SNMP endpoint described by this configuration.
    #[must_use]
    pub fn endpoint(&self) -> DeviceEndpoint {
        let endpoint = DeviceEndpoint::new(self.host.trim())
            .with_port(self.port)
            .with_community(self.community.clone());

        match self.timeout_ms {
            Some(ms) => endpoint.with_timeout(Duration::from_millis(ms)),
            None => endpoint,
        }
    }
}
