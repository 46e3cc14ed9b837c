// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One SNMP GET per cycle, classified.
//!
//! The [`Poller`] owns the endpoint and an [`SnmpClient`]. Each call to
//! [`Poller::poll`] performs exactly one exchange and sorts the outcome into
//! a [`PollResult`]. Both failure branches are logged here so callers only
//! need to decide what to keep.

use crate::error::ProtocolError;
use crate::protocol::{DeviceEndpoint, ErrorStatus, SnmpClient};

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// The agent returned the status blob.
    Success {
        /// The octet string bound to the status OID.
        raw_bytes: Vec<u8>,
    },

    /// The exchange never completed (unreachable host, timeout, socket error).
    TransportError {
        /// Description reported by the transport.
        indication: String,
    },

    /// The agent answered with a non-zero error status.
    ProtocolError {
        /// The reported error status.
        status: ErrorStatus,
        /// 1-based index of the offending binding, 0 if none.
        index: u32,
        /// OID of the offending binding when the index resolves.
        oid: Option<String>,
    },
}

impl PollResult {
    /// Returns `true` for [`PollResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the raw bytes, or the failure as a `ProtocolError`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Transport` or `ProtocolError::Status` for the
    /// two failure variants.
    pub fn into_bytes(self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Self::Success { raw_bytes } => Ok(raw_bytes),
            Self::TransportError { indication } => Err(ProtocolError::Transport(indication)),
            Self::ProtocolError { status, index, oid } => {
                Err(ProtocolError::Status { status, index, oid })
            }
        }
    }
}

/// Polls one printer endpoint.
///
/// # Examples
///
/// ```no_run
/// use brother_ql_sensor::poller::{PollResult, Poller};
/// use brother_ql_sensor::protocol::{DeviceEndpoint, Snmp2Client};
///
/// # async fn example() -> Result<(), brother_ql_sensor::ProtocolError> {
/// let poller = Poller::new(Snmp2Client::new(), DeviceEndpoint::new("192.168.1.60"));
/// if let PollResult::Success { raw_bytes } = poller.poll().await? {
///     println!("{} status bytes", raw_bytes.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Poller<C> {
    client: C,
    endpoint: DeviceEndpoint,
}

impl<C> Poller<C> {
    /// Creates a poller for the given endpoint.
    #[must_use]
    pub fn new(client: C, endpoint: DeviceEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Returns the polled endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    /// Returns the SNMP client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: SnmpClient> Poller<C> {
    /// Performs one GET and classifies the outcome.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MalformedResponse` when an otherwise successful
    /// reply does not hold exactly one octet-string binding. Transport and
    /// agent failures are not errors here; they are reported through the
    /// returned [`PollResult`].
    pub async fn poll(&self) -> Result<PollResult, ProtocolError> {
        let response = match self.client.get(&self.endpoint).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(host = %self.endpoint.host(), error = %e, "SNMP error");
                return Ok(PollResult::TransportError {
                    indication: transport_indication(e),
                });
            }
        };

        if !response.error_status.is_ok() {
            let oid = response.offending_oid().map(str::to_string);
            tracing::error!(
                host = %self.endpoint.host(),
                status = %response.error_status,
                oid = oid.as_deref().unwrap_or("?"),
                "SNMP error status"
            );
            return Ok(PollResult::ProtocolError {
                status: response.error_status,
                index: response.error_index,
                oid,
            });
        }

        let mut varbinds = response.varbinds;
        if varbinds.len() != 1 {
            return Err(ProtocolError::MalformedResponse(format!(
                "expected exactly one variable binding, got {}",
                varbinds.len()
            )));
        }

        let binding = varbinds.remove(0);
        match binding.value.as_bytes() {
            Some(bytes) => Ok(PollResult::Success {
                raw_bytes: bytes.to_vec(),
            }),
            None => Err(ProtocolError::MalformedResponse(format!(
                "expected OCTET STRING at {}, got {}",
                binding.oid,
                binding.value.kind()
            ))),
        }
    }
}

fn transport_indication(error: ProtocolError) -> String {
    match error {
        ProtocolError::Transport(indication) => indication,
        other => other.to_string(),
    }
}
