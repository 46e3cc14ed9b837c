// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brother QL sensor - expose a Brother QL label printer as a home-automation
//! sensor.
//!
//! The library polls the printer over SNMPv1, decodes the 32-byte raster
//! status reply it publishes, and derives a coarse state from it.
//!
//! # What the sensor exposes
//!
//! - **State**: `idle`, `printing`, `error` or `unknown`
//! - **Attributes**: media type, media width, media length, phase, errors
//! - **Updates**: one poll-and-interpret cycle per [`PrinterSensor::update`]
//!
//! Failed polls are logged through `tracing` and never blank the sensor: the
//! last successfully decoded values stay in place.
//!
//! # Quick Start
//!
//! ## One-shot reading
//!
//! ```no_run
//! use brother_ql_sensor::{PrinterSensor, SensorConfig};
//!
//! #[tokio::main]
//! async fn main() -> brother_ql_sensor::Result<()> {
//!     // Probes the printer and takes the first reading
//!     let sensor = PrinterSensor::builder(SensorConfig::new("192.168.1.60"))
//!         .build()
//!         .await?;
//!
//!     println!("{}: {}", sensor.name(), sensor.state());
//!     for (key, value) in sensor.attributes() {
//!         println!("  {key}: {value}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Periodic polling
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use brother_ql_sensor::{PollingTask, PrinterSensor, SensorConfig};
//!
//! #[tokio::main]
//! async fn main() -> brother_ql_sensor::Result<()> {
//!     let config = SensorConfig::from_json(r#"{"host": "printer.lan", "name": "Labels"}"#)?;
//!     let sensor = Arc::new(PrinterSensor::builder(config).build().await?);
//!
//!     let task = PollingTask::spawn(Arc::clone(&sensor), sensor.scan_interval());
//!
//!     let mut updates = sensor.watch();
//!     while updates.changed().await.is_ok() {
//!         println!("{}", updates.borrow_and_update().state());
//!     }
//!
//!     task.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom capabilities
//!
//! The SNMP client and the status decoder are traits, so either can be
//! replaced, e.g. by fakes in tests:
//!
//! ```no_run
//! use brother_ql_sensor::status::PrinterStatus;
//! use brother_ql_sensor::{ParseError, PrinterSensor, SensorConfig};
//!
//! # fn example() -> brother_ql_sensor::Result<()> {
//! let sensor = PrinterSensor::builder(SensorConfig::new("192.168.1.60"))
//!     .with_decoder(|_: &[u8]| -> Result<PrinterStatus, ParseError> {
//!         Ok(PrinterStatus::default())
//!     })
//!     .build_without_probe()?;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod error;
pub mod poller;
pub mod protocol;
mod sensor;
pub mod state;
pub mod status;

pub use config::{DEFAULT_NAME, DEFAULT_SCAN_INTERVAL, SensorConfig};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result};
pub use poller::{PollResult, Poller};
pub use protocol::{DeviceEndpoint, PRINTER_STATUS_OID, SnmpClient};
#[cfg(feature = "snmp")]
pub use protocol::Snmp2Client;
pub use sensor::{PollingTask, PrinterSensor, SensorBuilder};
pub use state::{SensorSnapshot, SensorState};
pub use status::{Decoder, PrinterStatus, RasterStatusDecoder};
