// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling of a sensor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::protocol::SnmpClient;
use crate::status::Decoder;

use super::PrinterSensor;

/// Background task calling [`PrinterSensor::update`] on a fixed interval.
///
/// The first update runs one interval after spawning, since building the
/// sensor already took a reading. Ticks missed while a slow poll is running
/// are skipped, not replayed. Dropping the handle stops the task after the
/// current cycle.
#[derive(Debug)]
pub struct PollingTask {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl PollingTask {
    /// Spawns the polling loop on the current tokio runtime.
    pub fn spawn<C, D>(sensor: Arc<PrinterSensor<C, D>>, interval: Duration) -> Self
    where
        C: SnmpClient + Send + Sync + 'static,
        D: Decoder + Send + Sync + 'static,
    {
        let (shutdown, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(name = %sensor.name(), ?interval, "Polling started");
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => sensor.update().await,
                }
            }
            tracing::debug!(name = %sensor.name(), "Polling stopped");
        });

        Self {
            shutdown: Some(shutdown),
            handle,
        }
    }

    /// Returns `true` once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the loop and waits for the current cycle to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!(error = %e, "Polling task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::Poller;
    use crate::poller::tests::FakeClient;
    use crate::protocol::DeviceEndpoint;
    use crate::state::SensorState;
    use crate::status::RasterStatusDecoder;
    use crate::status::raster::tests::reply;

    fn sensor(client: FakeClient) -> Arc<PrinterSensor<FakeClient>> {
        Arc::new(PrinterSensor::new(
            "Brother QL".to_string(),
            Duration::from_secs(2),
            Poller::new(client, DeviceEndpoint::new("192.168.1.60")),
            RasterStatusDecoder,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_every_interval() {
        let client = FakeClient::new();
        client.push_blob(&reply(0x0A, 62, 0, 0x00, 0, 0));
        client.push_blob(&reply(0x0A, 62, 0, 0x01, 0, 0));
        let sensor = sensor(client);

        let task = PollingTask::spawn(Arc::clone(&sensor), Duration::from_secs(2));
        let mut rx = sensor.watch();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().state(), SensorState::Idle);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().state(), SensorState::Printing);

        task.stop().await;
        assert_eq!(*sensor.poller.client().calls.lock(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_poll_before_first_interval() {
        let sensor = sensor(FakeClient::new());
        let task = PollingTask::spawn(Arc::clone(&sensor), Duration::from_secs(2));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(*sensor.poller.client().calls.lock(), 0);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_polls_keep_running() {
        let client = FakeClient::new();
        client.push_blob(&reply(0x0A, 62, 0, 0x00, 0, 0));
        let sensor = sensor(client);

        let task = PollingTask::spawn(Arc::clone(&sensor), Duration::from_secs(2));
        tokio::time::sleep(Duration::from_secs(7)).await;

        assert!(!task.is_finished());
        assert_eq!(*sensor.poller.client().calls.lock(), 3);
        assert_eq!(sensor.state(), SensorState::Idle);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_loop() {
        let sensor = sensor(FakeClient::new());
        let task = PollingTask::spawn(Arc::clone(&sensor), Duration::from_secs(2));

        task.stop().await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*sensor.poller.client().calls.lock(), 0);
    }
}
