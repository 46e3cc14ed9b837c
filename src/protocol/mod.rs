// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SNMP transport for reaching Brother QL printers.
//!
//! The rest of the library only sees the [`SnmpClient`] trait and the
//! protocol-neutral [`GetResponse`] it returns, so tests can swap in a fake
//! agent without touching the network.
//!
//! # Clients
//!
//! - [`Snmp2Client`]: SNMPv1 over UDP using the `snmp2` crate (feature `snmp`)

mod endpoint;
mod pdu;
#[cfg(feature = "snmp")]
mod snmp;

use std::future::Future;

pub use endpoint::{DeviceEndpoint, PRINTER_STATUS_OID};
pub use pdu::{ErrorStatus, GetResponse, SnmpValue, VarBind};
#[cfg(feature = "snmp")]
pub use snmp::{Snmp2Client, parse_oid};

use crate::error::ProtocolError;

/// Capability to perform a single SNMP GET against an endpoint.
pub trait SnmpClient {
    /// Sends one GET request for `endpoint.oid()` and waits for the reply.
    ///
    /// An agent-reported error status is not an `Err`: it comes back inside
    /// the [`GetResponse`] so the caller can classify it.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` when the exchange itself fails (unresolvable
    /// host, socket failure, timeout, undecodable reply).
    fn get(
        &self,
        endpoint: &DeviceEndpoint,
    ) -> impl Future<Output = Result<GetResponse, ProtocolError>> + Send;
}
