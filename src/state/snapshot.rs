// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Externally visible sensor values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::PrinterStatus;

use super::SensorState;

/// Placeholder shown for every field before the first successful poll.
pub const UNKNOWN: &str = "unknown";

/// Shown as media length for continuous (endless) media.
pub const ENDLESS: &str = "endless";

/// Shown as error list when the printer reports no errors.
pub const NO_ERRORS: &str = "-none-";

/// Formats a media width, e.g. `"62 mm"`.
#[must_use]
pub fn media_width_display(width_mm: u8) -> String {
    format!("{width_mm} mm")
}

/// Formats a media length; `None` means endless media.
#[must_use]
pub fn media_length_display(length_mm: Option<u8>) -> String {
    match length_mm {
        None | Some(0) => ENDLESS.to_string(),
        Some(length) => length.to_string(),
    }
}

/// Joins the error list with `", "`, or returns [`NO_ERRORS`].
#[must_use]
pub fn errors_display(errors: &[String]) -> String {
    if errors.is_empty() {
        NO_ERRORS.to_string()
    } else {
        errors.join(", ")
    }
}

/// Last successfully decoded sensor values.
///
/// The snapshot is updated in place by each successful poll and left
/// untouched by failed ones, so readers always see stale-but-valid data
/// rather than blanks.
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::state::{SensorSnapshot, SensorState};
/// use brother_ql_sensor::status::PrinterStatus;
///
/// let mut snapshot = SensorSnapshot::new();
/// assert_eq!(snapshot.state(), SensorState::Unknown);
///
/// let status = PrinterStatus {
///     media_type: "Continuous".into(),
///     media_width_mm: 12,
///     media_length_mm: None,
///     phase_type: "Waiting to receive".into(),
///     ..PrinterStatus::default()
/// };
/// assert!(snapshot.apply(&status));
/// assert_eq!(snapshot.state(), SensorState::Idle);
/// assert_eq!(snapshot.media_width(), "12 mm");
/// assert_eq!(snapshot.media_length(), "endless");
/// assert_eq!(snapshot.errors(), "-none-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    state: SensorState,
    media_type: String,
    media_width: String,
    media_length: String,
    phase: String,
    errors: String,
    status_type: String,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            state: SensorState::Unknown,
            media_type: UNKNOWN.to_string(),
            media_width: UNKNOWN.to_string(),
            media_length: UNKNOWN.to_string(),
            phase: UNKNOWN.to_string(),
            errors: UNKNOWN.to_string(),
            status_type: UNKNOWN.to_string(),
            last_updated: None,
        }
    }
}

impl SensorSnapshot {
    /// Creates a snapshot with every field unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the derived state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Returns the media type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the media width with unit, e.g. `"62 mm"`.
    #[must_use]
    pub fn media_width(&self) -> &str {
        &self.media_width
    }

    /// Returns the media length, or `"endless"`.
    #[must_use]
    pub fn media_length(&self) -> &str {
        &self.media_length
    }

    /// Returns the printer phase.
    #[must_use]
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Returns the joined error list, or `"-none-"`.
    #[must_use]
    pub fn errors(&self) -> &str {
        &self.errors
    }

    /// Returns the status type of the last reply.
    #[must_use]
    pub fn status_type(&self) -> &str {
        &self.status_type
    }

    /// Returns when the snapshot was last refreshed from the printer.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Returns `true` once at least one poll succeeded.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Returns the attributes mapping exposed to the host.
    ///
    /// Keys: `media_type`, `media_width`, `media_length`, `phase`, `errors`.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("media_type", self.media_type.clone()),
            ("media_width", self.media_width.clone()),
            ("media_length", self.media_length.clone()),
            ("phase", self.phase.clone()),
            ("errors", self.errors.clone()),
        ])
    }

    /// Replaces every field from a decoded status.
    ///
    /// Returns `true` if any visible value changed. The refresh timestamp
    /// is updated either way.
    pub fn apply(&mut self, status: &PrinterStatus) -> bool {
        self.apply_at(status, Utc::now())
    }

    pub(crate) fn apply_at(&mut self, status: &PrinterStatus, now: DateTime<Utc>) -> bool {
        let next = Self {
            state: SensorState::from(status),
            media_type: status.media_type.clone(),
            media_width: media_width_display(status.media_width_mm),
            media_length: media_length_display(status.media_length_mm),
            phase: status.phase_type.clone(),
            errors: errors_display(&status.errors),
            status_type: status.status_type.clone(),
            last_updated: Some(now),
        };

        let changed = !self.same_values(&next);
        *self = next;
        changed
    }

    fn same_values(&self, other: &Self) -> bool {
        self.state == other.state
            && self.media_type == other.media_type
            && self.media_width == other.media_width
            && self.media_length == other.media_length
            && self.phase == other.phase
            && self.errors == other.errors
            && self.status_type == other.status_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_status() -> PrinterStatus {
        PrinterStatus {
            media_type: "Continuous".into(),
            media_width_mm: 12,
            media_length_mm: None,
            phase_type: "Waiting to receive".into(),
            errors: Vec::new(),
            status_type: "Reply to status request".into(),
            phase_number: 0,
        }
    }

    #[test]
    fn new_snapshot_is_unknown() {
        let snapshot = SensorSnapshot::new();
        assert_eq!(snapshot.state(), SensorState::Unknown);
        assert_eq!(snapshot.media_type(), "unknown");
        assert_eq!(snapshot.errors(), "unknown");
        assert!(!snapshot.is_populated());
    }

    #[test]
    fn media_length_display_endless_only_for_sentinel() {
        assert_eq!(media_length_display(None), "endless");
        assert_eq!(media_length_display(Some(0)), "endless");
        assert_eq!(media_length_display(Some(29)), "29");
        assert_eq!(media_length_display(Some(255)), "255");
    }

    #[test]
    fn errors_display_joins_in_order() {
        assert_eq!(errors_display(&[]), "-none-");
        assert_eq!(
            errors_display(&["No media".to_string(), "Cover open".to_string()]),
            "No media, Cover open"
        );
    }

    #[test]
    fn end_to_end_idle_snapshot() {
        let mut snapshot = SensorSnapshot::new();
        snapshot.apply(&idle_status());

        assert_eq!(snapshot.state(), SensorState::Idle);
        assert_eq!(snapshot.media_type(), "Continuous");
        assert_eq!(snapshot.media_width(), "12 mm");
        assert_eq!(snapshot.media_length(), "endless");
        assert_eq!(snapshot.phase(), "Waiting to receive");
        assert_eq!(snapshot.errors(), "-none-");
        assert!(snapshot.is_populated());
    }

    #[test]
    fn apply_reports_changes_only_for_visible_values() {
        let mut snapshot = SensorSnapshot::new();
        assert!(snapshot.apply(&idle_status()));
        assert!(!snapshot.apply(&idle_status()));

        let printing = PrinterStatus {
            phase_type: "Printing state".into(),
            ..idle_status()
        };
        assert!(snapshot.apply(&printing));
        assert_eq!(snapshot.state(), SensorState::Printing);
    }

    #[test]
    fn apply_fully_replaces_previous_values() {
        let mut snapshot = SensorSnapshot::new();
        let failing = PrinterStatus {
            errors: vec!["No media".into(), "Cover open".into()],
            media_length_mm: Some(29),
            ..idle_status()
        };
        snapshot.apply(&failing);
        assert_eq!(snapshot.state(), SensorState::Error);
        assert_eq!(snapshot.errors(), "No media, Cover open");
        assert_eq!(snapshot.media_length(), "29");

        snapshot.apply(&idle_status());
        assert_eq!(snapshot.state(), SensorState::Idle);
        assert_eq!(snapshot.errors(), "-none-");
        assert_eq!(snapshot.media_length(), "endless");
    }

    #[test]
    fn attributes_mapping_keys() {
        let mut snapshot = SensorSnapshot::new();
        snapshot.apply(&idle_status());
        let attrs = snapshot.attributes();

        assert_eq!(
            attrs.keys().copied().collect::<Vec<_>>(),
            vec!["errors", "media_length", "media_type", "media_width", "phase"]
        );
        assert_eq!(attrs["media_width"], "12 mm");
        assert_eq!(attrs["phase"], "Waiting to receive");
    }

    #[test]
    fn apply_at_records_timestamp() {
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut snapshot = SensorSnapshot::new();
        snapshot.apply_at(&idle_status(), now);
        assert_eq!(snapshot.last_updated(), Some(now));
    }
}
