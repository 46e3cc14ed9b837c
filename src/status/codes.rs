// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Code tables of the Brother raster status reply.

use std::fmt;

/// Media loaded in the printer (byte 11).
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::status::MediaType;
///
/// assert_eq!(MediaType::from_code(0x0A), MediaType::ContinuousTape);
/// assert_eq!(MediaType::from_code(0x0A).to_string(), "Continuous length tape");
/// assert_eq!(MediaType::from_code(0x4A).to_string(), "Unknown (0x4A)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// No media loaded.
    NoMedia,
    /// Continuous length tape.
    ContinuousTape,
    /// Die-cut labels.
    DieCutLabels,
    /// Code not in the table.
    Unknown(u8),
}

impl MediaType {
    /// Maps the raw byte to a media type.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::NoMedia,
            0x0A => Self::ContinuousTape,
            0x0B => Self::DieCutLabels,
            other => Self::Unknown(other),
        }
    }

    /// Returns `true` if the code was not recognized.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMedia => f.write_str("No media"),
            Self::ContinuousTape => f.write_str("Continuous length tape"),
            Self::DieCutLabels => f.write_str("Die-cut labels"),
            Self::Unknown(code) => write!(f, "Unknown (0x{code:02X})"),
        }
    }
}

/// Why the printer sent the reply (byte 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusType {
    /// Reply to status request.
    StatusReply,
    /// Printing completed.
    PrintingCompleted,
    /// Error occurred.
    ErrorOccurred,
    /// Notification.
    Notification,
    /// Phase change.
    PhaseChange,
    /// Code not in the table.
    Unknown(u8),
}

impl StatusType {
    /// Maps the raw byte to a status type.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::StatusReply,
            0x01 => Self::PrintingCompleted,
            0x02 => Self::ErrorOccurred,
            0x05 => Self::Notification,
            0x06 => Self::PhaseChange,
            other => Self::Unknown(other),
        }
    }

    /// Returns `true` if the code was not recognized.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusReply => f.write_str("Reply to status request"),
            Self::PrintingCompleted => f.write_str("Printing completed"),
            Self::ErrorOccurred => f.write_str("Error occurred"),
            Self::Notification => f.write_str("Notification"),
            Self::PhaseChange => f.write_str("Phase change"),
            Self::Unknown(code) => write!(f, "Unknown (0x{code:02X})"),
        }
    }
}

/// Operational phase (byte 19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseType {
    /// Idle, waiting for a job.
    WaitingToReceive,
    /// Printing a job.
    Printing,
    /// Code not in the table.
    Unknown(u8),
}

impl PhaseType {
    /// Maps the raw byte to a phase.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::WaitingToReceive,
            0x01 => Self::Printing,
            other => Self::Unknown(other),
        }
    }

    /// Returns `true` if the code was not recognized.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingToReceive => f.write_str("Waiting to receive"),
            Self::Printing => f.write_str("Printing state"),
            Self::Unknown(code) => write!(f, "Unknown (0x{code:02X})"),
        }
    }
}

/// Messages for the bits of error information 1 (byte 8), bit 0 first.
pub const ERROR_INFORMATION_1: [&str; 8] = [
    "No media when printing",
    "End of media (die-cut size only)",
    "Tape cutter jam",
    "Not used",
    "Main unit in use (QL-560/650TD/1050)",
    "Printer turned off",
    "High-voltage adapter (not used)",
    "Fan doesn't work (QL-1050/1060N)",
];

/// Messages for the bits of error information 2 (byte 9), bit 0 first.
pub const ERROR_INFORMATION_2: [&str; 8] = [
    "Replace media error",
    "Expansion buffer full error",
    "Transmission / Communication error",
    "Communication buffer full error (not used)",
    "Cover opened while printing (Except QL-500)",
    "Cancel key (not used)",
    "Media cannot be fed (also when the media end is detected)",
    "System error",
];

/// Expands two error-information bytes into messages, in bit order.
#[must_use]
pub fn error_messages(info_1: u8, info_2: u8) -> Vec<String> {
    [(info_1, &ERROR_INFORMATION_1), (info_2, &ERROR_INFORMATION_2)]
        .into_iter()
        .flat_map(|(flags, table)| {
            table
                .iter()
                .enumerate()
                .filter(move |(bit, _)| flags & (1u8 << *bit) != 0)
                .map(|(_, message)| (*message).to_string())
        })
        .collect()
}
