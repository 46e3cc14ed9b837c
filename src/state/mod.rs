// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor state types.
//!
//! [`SensorState`] is the coarse state derived from a decoded status, and
//! [`SensorSnapshot`] holds the display values the host reads between polls.
//!
//! # Examples
//!
//! ```
//! use brother_ql_sensor::state::{SensorSnapshot, SensorState};
//! use brother_ql_sensor::status::PrinterStatus;
//!
//! let mut snapshot = SensorSnapshot::new();
//!
//! let status = PrinterStatus {
//!     errors: vec!["No media".into(), "Cover open".into()],
//!     phase_type: "Waiting to receive".into(),
//!     ..PrinterStatus::default()
//! };
//! snapshot.apply(&status);
//!
//! assert_eq!(snapshot.state(), SensorState::Error);
//! assert_eq!(snapshot.errors(), "No media, Cover open");
//! ```

mod sensor_state;
mod snapshot;

pub use sensor_state::SensorState;
pub use snapshot::{
    ENDLESS, NO_ERRORS, SensorSnapshot, UNKNOWN, errors_display, media_length_display,
    media_width_display,
};
