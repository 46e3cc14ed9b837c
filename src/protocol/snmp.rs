// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SNMPv1 client backed by the `snmp2` crate.

use std::time::Duration;

use snmp2::{AsyncSession, Oid, Value};

use crate::error::ProtocolError;
use crate::protocol::{DeviceEndpoint, ErrorStatus, GetResponse, SnmpClient, SnmpValue, VarBind};

/// Parses a dotted-numeric OID.
///
/// # Errors
///
/// Returns `ProtocolError::InvalidAddress` if any arc is not a number or the
/// arcs do not form a valid OID.
pub fn parse_oid(s: &str) -> Result<Oid<'static>, ProtocolError> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::parse::<u64>)
        .collect();

    let parts = parts.map_err(|e| ProtocolError::InvalidAddress(format!("invalid OID {s}: {e}")))?;
    Oid::from(&parts)
        .map_err(|e| ProtocolError::InvalidAddress(format!("invalid OID {s}: {e:?}")))
}

/// SNMPv1 client talking to the printer over UDP.
///
/// Each call opens a fresh session and sends a single GET; there is no
/// retry and no socket reuse between polls.
///
/// # Examples
///
/// ```no_run
/// use brother_ql_sensor::protocol::{DeviceEndpoint, Snmp2Client, SnmpClient};
///
/// # async fn example() -> Result<(), brother_ql_sensor::ProtocolError> {
/// let client = Snmp2Client::new();
/// let response = client.get(&DeviceEndpoint::new("192.168.1.60")).await?;
/// println!("{} bindings", response.varbinds.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snmp2Client {
    starting_request_id: i32,
}

impl Snmp2Client {
    /// Creates a new client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            starting_request_id: 1,
        }
    }

    async fn exchange(&self, endpoint: &DeviceEndpoint) -> Result<GetResponse, ProtocolError> {
        let oid = parse_oid(endpoint.oid())?;
        let peer = endpoint.target();

        let mut session = AsyncSession::new_v1(
            peer.as_str(),
            endpoint.community().as_bytes(),
            self.starting_request_id,
        )
        .await
        .map_err(|e| ProtocolError::Transport(format!("cannot open session to {peer}: {e}")))?;

        tracing::debug!(peer = %peer, oid = %endpoint.oid(), "Sending SNMP GET");

        let pdu = session
            .get(&oid)
            .await
            .map_err(|e| ProtocolError::Transport(e.to_string()))?;

        let error_status = ErrorStatus::from_code(pdu.error_status);
        let error_index = pdu.error_index;
        let varbinds: Vec<VarBind> = pdu
            .varbinds
            .map(|(oid, value)| VarBind::new(oid.to_string(), convert_value(&value)))
            .collect();

        tracing::debug!(
            peer = %peer,
            status = %error_status,
            bindings = varbinds.len(),
            "Received SNMP response"
        );

        Ok(GetResponse::error(error_status, error_index, varbinds))
    }
}

impl Default for Snmp2Client {
    fn default() -> Self {
        Self::new()
    }
}

impl SnmpClient for Snmp2Client {
    async fn get(&self, endpoint: &DeviceEndpoint) -> Result<GetResponse, ProtocolError> {
        match endpoint.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, Box::pin(self.exchange(endpoint)))
                .await
                .map_err(|_| ProtocolError::Timeout(millis(timeout)))?,
            None => Box::pin(self.exchange(endpoint)).await,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn convert_value(value: &Value<'_>) -> SnmpValue {
    match value {
        Value::OctetString(bytes) => SnmpValue::OctetString(bytes.to_vec()),
        Value::Integer(n) => SnmpValue::Integer(*n),
        Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => {
            SnmpValue::Integer(i64::from(*n))
        }
        Value::Null => SnmpValue::Null,
        other => SnmpValue::Other(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_printer_status_oid() {
        let oid = parse_oid(crate::protocol::PRINTER_STATUS_OID).unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.4.1.2435.3.3.9.1.6.1.0");
    }

    #[test]
    fn parse_oid_rejects_garbage() {
        let err = parse_oid("1.3.six.1").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidAddress(_)));
    }

    #[test]
    fn convert_octet_string() {
        let value = Value::OctetString(&[0x80, 0x20, 0x42]);
        assert_eq!(
            convert_value(&value),
            SnmpValue::OctetString(vec![0x80, 0x20, 0x42])
        );
    }

    #[test]
    fn convert_counters_to_integer() {
        assert_eq!(convert_value(&Value::Counter32(7)), SnmpValue::Integer(7));
        assert_eq!(convert_value(&Value::Null), SnmpValue::Null);
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Snmp2Client::default(), Snmp2Client::new());
        assert_eq!(Snmp2Client::default().starting_request_id, 1);
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
