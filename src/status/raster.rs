// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brother raster status reply decoder.

use crate::error::ParseError;

use super::codes::{MediaType, PhaseType, StatusType, error_messages};
use super::{Decoder, PrinterStatus};

/// Size of a raster status reply in bytes.
pub const STATUS_REPLY_LEN: usize = 32;

/// Print head mark, size and fixed `B`.
const HEADER: [u8; 3] = [0x80, 0x20, 0x42];

const ERROR_INFO_1: usize = 8;
const ERROR_INFO_2: usize = 9;
const MEDIA_WIDTH: usize = 10;
const MEDIA_TYPE: usize = 11;
const MEDIA_LENGTH: usize = 17;
const STATUS_TYPE: usize = 18;
const PHASE_TYPE: usize = 19;
const PHASE_NUMBER_HIGH: usize = 20;
const PHASE_NUMBER_LOW: usize = 21;

/// Formats bytes as colon-separated hex, e.g. `80:20:42`.
#[must_use]
pub fn hex_format(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Decodes the 32-byte status reply of Brother QL printers.
///
/// Unknown media, status or phase codes do not fail the decode; they are
/// logged and rendered as `Unknown (0xNN)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterStatusDecoder;

impl Decoder for RasterStatusDecoder {
    fn decode(&self, raw: &[u8]) -> Result<PrinterStatus, ParseError> {
        if raw.len() < STATUS_REPLY_LEN {
            return Err(ParseError::TooShort {
                expected: STATUS_REPLY_LEN,
                actual: raw.len(),
            });
        }
        if !raw.starts_with(&HEADER) {
            return Err(ParseError::BadHeader(hex_format(&raw[..HEADER.len()])));
        }

        tracing::trace!(bytes = %hex_format(raw), "Decoding raster status reply");

        let errors = error_messages(raw[ERROR_INFO_1], raw[ERROR_INFO_2]);
        for error in &errors {
            tracing::warn!(error = %error, "Printer reports error");
        }

        let media_type = MediaType::from_code(raw[MEDIA_TYPE]);
        if media_type.is_unknown() {
            tracing::error!(code = raw[MEDIA_TYPE], "Unknown media type");
        }

        let status_type = StatusType::from_code(raw[STATUS_TYPE]);
        if status_type.is_unknown() {
            tracing::error!(code = raw[STATUS_TYPE], "Unknown status type");
        }

        let phase_type = PhaseType::from_code(raw[PHASE_TYPE]);
        if phase_type.is_unknown() {
            tracing::error!(code = raw[PHASE_TYPE], "Unknown phase type");
        }

        let media_length_mm = match raw[MEDIA_LENGTH] {
            0 => None,
            length => Some(length),
        };

        Ok(PrinterStatus {
            media_type: media_type.to_string(),
            media_width_mm: raw[MEDIA_WIDTH],
            media_length_mm,
            phase_type: phase_type.to_string(),
            errors,
            status_type: status_type.to_string(),
            phase_number: u16::from_be_bytes([raw[PHASE_NUMBER_HIGH], raw[PHASE_NUMBER_LOW]]),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a status reply with the given fields and everything else zero.
    pub(crate) fn reply(
        media_type: u8,
        width: u8,
        length: u8,
        phase: u8,
        error_1: u8,
        error_2: u8,
    ) -> Vec<u8> {
        let mut raw = vec![0u8; STATUS_REPLY_LEN];
        raw[..3].copy_from_slice(&HEADER);
        raw[ERROR_INFO_1] = error_1;
        raw[ERROR_INFO_2] = error_2;
        raw[MEDIA_WIDTH] = width;
        raw[MEDIA_TYPE] = media_type;
        raw[MEDIA_LENGTH] = length;
        raw[PHASE_TYPE] = phase;
        raw
    }

    #[test]
    fn decodes_idle_continuous_tape() {
        let status = RasterStatusDecoder
            .decode(&reply(0x0A, 12, 0, 0x00, 0, 0))
            .unwrap();

        assert_eq!(status.media_type, "Continuous length tape");
        assert_eq!(status.media_width_mm, 12);
        assert_eq!(status.media_length_mm, None);
        assert_eq!(status.phase_type, "Waiting to receive");
        assert_eq!(status.status_type, "Reply to status request");
        assert!(status.errors.is_empty());
    }

    #[test]
    fn decodes_die_cut_labels_while_printing() {
        let mut raw = reply(0x0B, 29, 90, 0x01, 0, 0);
        raw[STATUS_TYPE] = 0x06;
        raw[PHASE_NUMBER_HIGH] = 0x01;
        raw[PHASE_NUMBER_LOW] = 0x02;

        let status = RasterStatusDecoder.decode(&raw).unwrap();
        assert_eq!(status.media_type, "Die-cut labels");
        assert_eq!(status.media_length_mm, Some(90));
        assert_eq!(status.phase_type, "Printing state");
        assert_eq!(status.status_type, "Phase change");
        assert_eq!(status.phase_number, 0x0102);
    }

    #[test]
    fn decodes_error_flags() {
        let status = RasterStatusDecoder
            .decode(&reply(0x00, 0, 0, 0x00, 0b0000_0001, 0b0001_0000))
            .unwrap();

        assert_eq!(status.media_type, "No media");
        assert_eq!(
            status.errors,
            vec![
                "No media when printing",
                "Cover opened while printing (Except QL-500)"
            ]
        );
    }

    #[test]
    fn unknown_codes_are_rendered_not_rejected() {
        let status = RasterStatusDecoder
            .decode(&reply(0x4A, 62, 0, 0x09, 0, 0))
            .unwrap();
        assert_eq!(status.media_type, "Unknown (0x4A)");
        assert_eq!(status.phase_type, "Unknown (0x09)");
    }

    #[test]
    fn short_reply_is_rejected() {
        let err = RasterStatusDecoder.decode(&[0x80, 0x20, 0x42]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooShort {
                expected: 32,
                actual: 3
            }
        ));
    }

    #[test]
    fn wrong_header_is_rejected() {
        let mut raw = reply(0x0A, 62, 0, 0, 0, 0);
        raw[0] = 0x81;
        let err = RasterStatusDecoder.decode(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "status reply does not start with the usual header (80:20:42): 81:20:42"
        );
    }

    #[test]
    fn longer_reply_is_accepted() {
        let mut raw = reply(0x0A, 62, 0, 0, 0, 0);
        raw.extend_from_slice(&[0xFF; 4]);
        assert!(RasterStatusDecoder.decode(&raw).is_ok());
    }

    #[test]
    fn hex_format_uses_colons() {
        assert_eq!(hex_format(&[0x80, 0x20, 0x42]), "80:20:42");
        assert_eq!(hex_format(&[]), "");
    }
}
