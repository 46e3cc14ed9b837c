// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Brother QL sensor library.
//!
//! This module provides the error hierarchy for every failure a polling cycle
//! can run into: reaching the printer over SNMP, decoding its status reply,
//! and validating the sensor configuration.

use thiserror::Error;

use crate::protocol::ErrorStatus;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the SNMP agent.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding the printer status reply.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during sensor setup.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Another update cycle is still running.
    #[error("an update is already in progress")]
    UpdateInProgress,
}

/// Errors related to the SNMP exchange with the printer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The transport or SNMP engine could not complete the exchange.
    #[error("SNMP transport error: {0}")]
    Transport(String),

    /// The agent answered with a non-zero error status.
    #[error("SNMP error: {status} at {}", oid.as_deref().unwrap_or("?"))]
    Status {
        /// The error status reported by the agent.
        status: ErrorStatus,
        /// The 1-based index of the offending variable binding.
        index: u32,
        /// The offending OID, when the index resolves to a returned binding.
        oid: Option<String>,
    },

    /// The agent answered, but not with exactly one octet-string binding.
    #[error("malformed SNMP response: {0}")]
    MalformedResponse(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid host, port or OID.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing configuration and printer status replies.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The status reply is shorter than the fixed reply size.
    #[error("status reply too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Required length in bytes.
        expected: usize,
        /// Length of the received payload.
        actual: usize,
    },

    /// The status reply does not start with the raster status header.
    #[error("status reply does not start with the usual header (80:20:42): {0}")]
    BadHeader(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to sensor setup.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Sensor configuration is invalid.
    #[error("invalid sensor configuration: {0}")]
    InvalidConfiguration(String),

    /// The printer did not answer the setup probe.
    #[error("printer unreachable: {0}")]
    Unreachable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_with_oid() {
        let err = ProtocolError::Status {
            status: ErrorStatus::NoSuchName,
            index: 1,
            oid: Some("1.3.6.1.4.1.2435.3.3.9.1.6.1.0".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "SNMP error: noSuchName at 1.3.6.1.4.1.2435.3.3.9.1.6.1.0"
        );
    }

    #[test]
    fn status_error_display_without_oid() {
        let err = ProtocolError::Status {
            status: ErrorStatus::GenErr,
            index: 0,
            oid: None,
        };
        assert_eq!(err.to_string(), "SNMP error: genErr at ?");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::Timeout(500).into();
        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(500))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::TooShort {
            expected: 32,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "status reply too short: expected 32 bytes, got 4"
        );
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::InvalidConfiguration("host is required".to_string());
        assert_eq!(
            err.to_string(),
            "invalid sensor configuration: host is required"
        );
    }
}
