// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brother QL printer exposed as a home-automation sensor.
//!
//! A [`PrinterSensor`] owns a [`Poller`], a [`Decoder`] and the
//! [`SensorSnapshot`] the host reads. Each [`update`](PrinterSensor::update)
//! performs one poll-and-interpret cycle; failures are logged and leave the
//! snapshot untouched.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use brother_ql_sensor::{PollingTask, PrinterSensor, SensorConfig};
//!
//! # async fn example() -> brother_ql_sensor::Result<()> {
//! let config = SensorConfig::new("192.168.1.60");
//! let sensor = Arc::new(PrinterSensor::builder(config).build().await?);
//!
//! println!("{} is {}", sensor.name(), sensor.state());
//!
//! // Keep the snapshot fresh in the background
//! let task = PollingTask::spawn(Arc::clone(&sensor), sensor.scan_interval());
//! let mut updates = sensor.watch();
//! updates.changed().await.ok();
//! println!("{:?}", sensor.attributes());
//!
//! task.stop().await;
//! # Ok(())
//! # }
//! ```

mod builder;
mod polling;

pub use builder::SensorBuilder;
pub use polling::PollingTask;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::error::{Error, ProtocolError};
use crate::poller::{PollResult, Poller};
use crate::protocol::{DeviceEndpoint, SnmpClient};
use crate::state::{SensorSnapshot, SensorState};
use crate::status::{Decoder, RasterStatusDecoder};

#[cfg(feature = "snmp")]
use crate::config::SensorConfig;
#[cfg(feature = "snmp")]
use crate::protocol::Snmp2Client;

/// A Brother QL label printer polled over SNMP.
///
/// The type parameters select the SNMP client and status decoder; the
/// defaults talk to a real printer.
pub struct PrinterSensor<C, D = RasterStatusDecoder> {
    name: String,
    scan_interval: Duration,
    poller: Poller<C>,
    decoder: D,
    snapshot: RwLock<SensorSnapshot>,
    snapshot_tx: watch::Sender<SensorSnapshot>,
    in_flight: AtomicBool,
}

#[cfg(feature = "snmp")]
impl PrinterSensor<Snmp2Client> {
    /// Creates a builder using the SNMPv1 client and the raster status
    /// decoder.
    #[must_use]
    pub fn builder(config: SensorConfig) -> SensorBuilder<Snmp2Client, RasterStatusDecoder> {
        SensorBuilder::from_parts(config, Snmp2Client::new(), RasterStatusDecoder)
    }
}

impl<C: SnmpClient, D: Decoder> PrinterSensor<C, D> {
    pub(crate) fn new(name: String, scan_interval: Duration, poller: Poller<C>, decoder: D) -> Self {
        let snapshot = SensorSnapshot::new();
        let (snapshot_tx, _) = watch::channel(snapshot.clone());

        Self {
            name,
            scan_interval,
            poller,
            decoder,
            snapshot: RwLock::new(snapshot),
            snapshot_tx,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns the sensor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the derived printer state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.snapshot.read().state()
    }

    /// Returns the unit of the state value; the state is not a measurement.
    #[must_use]
    pub fn unit_of_measurement(&self) -> Option<&str> {
        None
    }

    /// Returns the attributes mapping exposed to the host.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<&'static str, String> {
        self.snapshot.read().attributes()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot.read().clone()
    }

    /// Returns a receiver notified whenever the snapshot changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SensorSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Returns the polled endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &DeviceEndpoint {
        self.poller.endpoint()
    }

    /// Runs one poll-and-interpret cycle.
    ///
    /// Never fails: every error is logged and the previous snapshot is kept.
    /// A call made while another cycle is running is skipped.
    pub async fn update(&self) {
        match self.refresh().await {
            Ok(changed) => {
                tracing::debug!(name = %self.name, state = %self.state(), changed, "Sensor updated");
            }
            Err(Error::UpdateInProgress) => {
                tracing::debug!(name = %self.name, "Previous update still running, skipping");
            }
            Err(Error::Protocol(
                e @ (ProtocolError::Transport(_) | ProtocolError::Status { .. }),
            )) => {
                // The poller already logged the failure.
                tracing::debug!(name = %self.name, error = %e, "Keeping previous values");
            }
            Err(e) => {
                tracing::error!(name = %self.name, error = %e, "Update failed, keeping previous values");
            }
        }
    }

    /// Runs one poll-and-interpret cycle and reports the outcome.
    ///
    /// Returns `true` if the snapshot changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::UpdateInProgress` if another cycle is running, or the
    /// protocol or parse error that ended this cycle. The snapshot is left
    /// untouched on error.
    pub async fn refresh(&self) -> Result<bool, Error> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(Error::UpdateInProgress)?;
        let result = self.poller.poll().await;
        self.complete_cycle(result)
    }

    /// Interprets a poll outcome and applies it to the snapshot.
    pub(crate) fn complete_cycle(
        &self,
        result: Result<PollResult, ProtocolError>,
    ) -> Result<bool, Error> {
        let raw_bytes = result?.into_bytes()?;
        let status = self.decoder.decode(&raw_bytes)?;

        let changed = {
            let mut snapshot = self.snapshot.write();
            let changed = snapshot.apply(&status);
            if changed {
                self.snapshot_tx.send_replace(snapshot.clone());
            }
            changed
        };

        if changed {
            tracing::info!(
                name = %self.name,
                state = %SensorState::from(&status),
                phase = %status.phase_type,
                "Printer state changed"
            );
        }

        Ok(changed)
    }
}

impl<C, D> std::fmt::Debug for PrinterSensor<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrinterSensor")
            .field("name", &self.name)
            .field("host", &self.poller.endpoint().host())
            .field("scan_interval", &self.scan_interval)
            .field("snapshot", &*self.snapshot.read())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when the cycle ends, even if it is cancelled.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
