// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor builder.

use crate::config::SensorConfig;
use crate::error::{DeviceError, Error};
use crate::poller::{PollResult, Poller};
use crate::protocol::SnmpClient;
use crate::status::Decoder;

use super::PrinterSensor;

/// Builder for creating a [`PrinterSensor`].
///
/// # Examples
///
/// ```no_run
/// use brother_ql_sensor::{PrinterSensor, SensorConfig};
///
/// # async fn example() -> brother_ql_sensor::Result<()> {
/// // Probe the printer and take the first reading
/// let sensor = PrinterSensor::builder(SensorConfig::new("192.168.1.60"))
///     .build()
///     .await?;
///
/// // No network access until the first update
/// let sensor = PrinterSensor::builder(SensorConfig::new("192.168.1.60"))
///     .build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SensorBuilder<C, D> {
    config: SensorConfig,
    client: C,
    decoder: D,
}

impl<C, D> SensorBuilder<C, D> {
    /// Creates a builder from explicit client and decoder capabilities.
    #[must_use]
    pub fn from_parts(config: SensorConfig, client: C, decoder: D) -> Self {
        Self {
            config,
            client,
            decoder,
        }
    }

    /// Replaces the SNMP client.
    #[must_use]
    pub fn with_client<C2>(self, client: C2) -> SensorBuilder<C2, D> {
        SensorBuilder {
            config: self.config,
            client,
            decoder: self.decoder,
        }
    }

    /// Replaces the status decoder.
    #[must_use]
    pub fn with_decoder<D2>(self, decoder: D2) -> SensorBuilder<C, D2> {
        SensorBuilder {
            config: self.config,
            client: self.client,
            decoder,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }
}

impl<C: SnmpClient, D: Decoder> SensorBuilder<C, D> {
    /// Builds the sensor after probing the printer.
    ///
    /// The probe is one GET. If the printer cannot be reached, setup fails;
    /// otherwise the probe reply is used as the first update, so the sensor
    /// comes back already populated when the printer answered sensibly.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The configuration is invalid
    /// - The printer does not answer the probe
    pub async fn build(self) -> Result<PrinterSensor<C, D>, Error> {
        let sensor = self.build_without_probe()?;

        let probe = sensor.poller.poll().await;
        if let Ok(PollResult::TransportError { indication }) = &probe {
            tracing::error!(
                host = %sensor.endpoint().host(),
                "Printer unreachable, check the printer host in the configuration"
            );
            return Err(DeviceError::Unreachable(indication.clone()).into());
        }

        tracing::info!(
            name = %sensor.name(),
            host = %sensor.endpoint().host(),
            "Brother QL sensor set up"
        );

        if let Err(e) = sensor.complete_cycle(probe) {
            tracing::warn!(name = %sensor.name(), error = %e, "Initial update failed");
        }

        Ok(sensor)
    }

    /// Builds the sensor without network access.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn build_without_probe(self) -> Result<PrinterSensor<C, D>, Error> {
        self.config.validate()?;

        let poller = Poller::new(self.client, self.config.endpoint());
        Ok(PrinterSensor::new(
            self.config.name.clone(),
            self.config.scan_interval(),
            poller,
            self.decoder,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, ProtocolError};
    use crate::poller::tests::FakeClient;
    use crate::protocol::{ErrorStatus, GetResponse};
    use crate::state::SensorState;
    use crate::status::raster::tests::reply;
    use crate::status::{PrinterStatus, RasterStatusDecoder};

    fn builder(client: FakeClient) -> SensorBuilder<FakeClient, RasterStatusDecoder> {
        SensorBuilder::from_parts(SensorConfig::new("192.168.1.60"), client, RasterStatusDecoder)
    }

    #[test]
    fn build_without_probe_uses_config() {
        let config = SensorConfig::new("192.168.1.60")
            .with_name("Shipping")
            .with_port(1161);
        let sensor = SensorBuilder::from_parts(config, FakeClient::new(), RasterStatusDecoder)
            .build_without_probe()
            .unwrap();

        assert_eq!(sensor.name(), "Shipping");
        assert_eq!(sensor.endpoint().port(), 1161);
        assert_eq!(sensor.state(), SensorState::Unknown);
        assert_eq!(*sensor.poller.client().calls.lock(), 0);
    }

    #[test]
    fn build_without_probe_rejects_invalid_config() {
        let err = SensorBuilder::from_parts(
            SensorConfig::new(""),
            FakeClient::new(),
            RasterStatusDecoder,
        )
        .build_without_probe()
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn build_probes_and_populates() {
        let client = FakeClient::new();
        client.push_blob(&reply(0x0A, 62, 0, 0x00, 0, 0));

        let sensor = builder(client).build().await.unwrap();

        assert_eq!(sensor.state(), SensorState::Idle);
        assert_eq!(*sensor.poller.client().calls.lock(), 1);
    }

    #[tokio::test]
    async fn build_fails_when_unreachable() {
        let client = FakeClient::new();
        client.push(Err(ProtocolError::Transport("no route to host".into())));

        let err = builder(client).build().await.unwrap_err();
        assert!(matches!(err, Error::Device(DeviceError::Unreachable(_))));
    }

    #[tokio::test]
    async fn build_tolerates_agent_error_status() {
        let client = FakeClient::new();
        client.push(Ok(GetResponse::error(ErrorStatus::GenErr, 0, Vec::new())));

        let sensor = builder(client).build().await.unwrap();
        assert_eq!(sensor.state(), SensorState::Unknown);
    }

    #[test]
    fn with_decoder_swaps_capability() {
        let builder = builder(FakeClient::new()).with_decoder(
            |_: &[u8]| -> Result<PrinterStatus, ParseError> {
                Err(ParseError::BadHeader("00:00:00".into()))
            },
        );
        assert_eq!(builder.config().host, "192.168.1.60");
        assert!(builder.build_without_probe().is_ok());
    }
}
