// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printer status decoding.
//!
//! Brother QL printers publish their 32-byte raster status reply as one SNMP
//! octet string. A [`Decoder`] turns that blob into a [`PrinterStatus`];
//! [`RasterStatusDecoder`] implements the vendor layout.
//!
//! # Examples
//!
//! ```
//! use brother_ql_sensor::status::{Decoder, RasterStatusDecoder};
//!
//! let mut blob = [0u8; 32];
//! blob[..3].copy_from_slice(&[0x80, 0x20, 0x42]);
//! blob[10] = 62; // width in mm
//! blob[11] = 0x0A; // continuous tape
//!
//! let status = RasterStatusDecoder.decode(&blob).unwrap();
//! assert_eq!(status.media_type, "Continuous length tape");
//! assert_eq!(status.media_width_mm, 62);
//! assert_eq!(status.media_length_mm, None);
//! assert_eq!(status.phase_type, "Waiting to receive");
//! ```

mod codes;
pub(crate) mod raster;

pub use codes::{
    ERROR_INFORMATION_1, ERROR_INFORMATION_2, MediaType, PhaseType, StatusType, error_messages,
};
pub use raster::{RasterStatusDecoder, STATUS_REPLY_LEN, hex_format};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Decoded printer status.
///
/// Every successful poll yields a fresh value that fully replaces the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterStatus {
    /// Loaded media, e.g. "Continuous length tape".
    pub media_type: String,
    /// Media width in millimetres.
    pub media_width_mm: u8,
    /// Media length in millimetres; `None` for endless media.
    pub media_length_mm: Option<u8>,
    /// Operational phase, e.g. "Waiting to receive".
    pub phase_type: String,
    /// Active error messages, in the printer's bit order.
    pub errors: Vec<String>,
    /// Why the printer sent the reply, e.g. "Reply to status request".
    #[serde(default)]
    pub status_type: String,
    /// Phase number within the current phase.
    #[serde(default)]
    pub phase_number: u16,
}

impl PrinterStatus {
    /// Returns `true` if the printer reports at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Capability to turn a raw status blob into a [`PrinterStatus`].
pub trait Decoder {
    /// Decodes `raw` into a printer status.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the payload is not a valid status reply.
    fn decode(&self, raw: &[u8]) -> Result<PrinterStatus, ParseError>;
}

impl<F> Decoder for F
where
    F: Fn(&[u8]) -> Result<PrinterStatus, ParseError>,
{
    fn decode(&self, raw: &[u8]) -> Result<PrinterStatus, ParseError> {
        self(raw)
    }
}
