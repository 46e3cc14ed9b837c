// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coarse operational state of the printer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::PrinterStatus;

/// State value exposed by the sensor.
///
/// Any state may follow any other; the value is recomputed from scratch on
/// every successful poll.
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::state::SensorState;
///
/// assert_eq!(SensorState::derive(&[], "Waiting to receive"), SensorState::Idle);
/// assert_eq!(SensorState::derive(&[], "Printing state"), SensorState::Printing);
/// assert_eq!(
///     SensorState::derive(&["Cover open".to_string()], "Printing state"),
///     SensorState::Error
/// );
/// assert_eq!(SensorState::default().as_str(), "unknown");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorState {
    /// Waiting for a job.
    Idle,
    /// Printing a job.
    Printing,
    /// The printer reports at least one error.
    Error,
    /// Not polled yet, or the phase is not recognized.
    #[default]
    Unknown,
}

impl SensorState {
    /// Returns the state string exposed to the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Printing => "printing",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

    /// Derives the state from the error list and phase, first match wins.
    ///
    /// 1. any error → `Error`
    /// 2. phase contains "waiting" → `Idle`
    /// 3. phase contains "printing" → `Printing`
    /// 4. otherwise → `Unknown`
    ///
    /// Phase checks are case-insensitive.
    #[must_use]
    pub fn derive(errors: &[String], phase_type: &str) -> Self {
        if !errors.is_empty() {
            return Self::Error;
        }

        let phase = phase_type.to_lowercase();
        if phase.contains("waiting") {
            Self::Idle
        } else if phase.contains("printing") {
            Self::Printing
        } else {
            Self::Unknown
        }
    }
}

impl From<&PrinterStatus> for SensorState {
    fn from(status: &PrinterStatus) -> Self {
        Self::derive(&status.errors, &status.phase_type)
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
