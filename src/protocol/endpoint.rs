// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SNMP endpoint of a Brother QL printer.

use std::time::Duration;

/// OID under which Brother QL printers publish their raster status reply.
pub const PRINTER_STATUS_OID: &str = "1.3.6.1.4.1.2435.3.3.9.1.6.1.0";

/// Where and how to reach the printer's SNMP agent.
///
/// An endpoint is immutable once built; the `with_*` methods consume and
/// return it so the chain reads like a configuration literal.
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::protocol::DeviceEndpoint;
/// use std::time::Duration;
///
/// // Defaults: port 161, community "public", the printer status OID
/// let endpoint = DeviceEndpoint::new("192.168.1.60");
/// assert_eq!(endpoint.port(), 161);
/// assert_eq!(endpoint.community(), "public");
///
/// // With all options
/// let endpoint = DeviceEndpoint::new("printer.lan")
///     .with_port(1161)
///     .with_community("labels")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(endpoint.timeout(), Some(Duration::from_secs(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    host: String,
    port: u16,
    community: String,
    oid: String,
    timeout: Option<Duration>,
}

impl DeviceEndpoint {
    /// Default SNMP agent port.
    pub const DEFAULT_PORT: u16 = 161;
    /// Default read community.
    pub const DEFAULT_COMMUNITY: &'static str = "public";

    /// Creates an endpoint for the specified host with default settings.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            community: Self::DEFAULT_COMMUNITY.to_string(),
            oid: PRINTER_STATUS_OID.to_string(),
            timeout: None,
        }
    }

    /// Sets a custom agent port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the read community.
    #[must_use]
    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    /// Bounds the wait for a reply.
    ///
    /// Without a timeout the exchange waits until the transport gives up.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the community string.
    #[must_use]
    pub fn community(&self) -> &str {
        &self.community
    }

    /// Returns the polled OID.
    #[must_use]
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// Returns the reply timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn target(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_default_values() {
        let endpoint = DeviceEndpoint::new("192.168.1.60");
        assert_eq!(endpoint.host(), "192.168.1.60");
        assert_eq!(endpoint.port(), 161);
        assert_eq!(endpoint.community(), "public");
        assert_eq!(endpoint.oid(), "1.3.6.1.4.1.2435.3.3.9.1.6.1.0");
        assert!(endpoint.timeout().is_none());
    }

    #[test]
    fn endpoint_builder_chain() {
        let endpoint = DeviceEndpoint::new("printer.lan")
            .with_port(1161)
            .with_community("labels")
            .with_timeout(Duration::from_millis(750));

        assert_eq!(endpoint.port(), 1161);
        assert_eq!(endpoint.community(), "labels");
        assert_eq!(endpoint.timeout(), Some(Duration::from_millis(750)));
        assert_eq!(endpoint.oid(), PRINTER_STATUS_OID);
    }

    #[test]
    fn endpoint_target() {
        assert_eq!(DeviceEndpoint::new("10.0.0.5").target(), "10.0.0.5:161");
        assert_eq!(
            DeviceEndpoint::new("fe80::1").with_port(1161).target(),
            "[fe80::1]:1161"
        );
    }
}
