// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol-neutral view of an SNMP GET response.

use std::fmt;

/// SNMP error status carried in a response PDU.
///
/// Names follow the SMI spelling so log lines read like agent diagnostics.
///
/// # Examples
///
/// ```
/// use brother_ql_sensor::protocol::ErrorStatus;
///
/// assert_eq!(ErrorStatus::from_code(2), ErrorStatus::NoSuchName);
/// assert_eq!(ErrorStatus::NoSuchName.as_str(), "noSuchName");
/// assert!(ErrorStatus::from_code(0).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorStatus {
    /// No error (0).
    NoError,
    /// Response would not fit in a single message (1).
    TooBig,
    /// The requested OID does not exist (2).
    NoSuchName,
    /// A value in a set request was rejected (3).
    BadValue,
    /// Attempt to modify a read-only object (4).
    ReadOnly,
    /// Generic agent failure (5).
    GenErr,
    /// Access denied (6).
    NoAccess,
    /// Wrong type in a set request (7).
    WrongType,
    /// Wrong length in a set request (8).
    WrongLength,
    /// Wrong encoding in a set request (9).
    WrongEncoding,
    /// Wrong value in a set request (10).
    WrongValue,
    /// Object cannot be created (11).
    NoCreation,
    /// Value inconsistent with other managed objects (12).
    InconsistentValue,
    /// Agent ran out of resources (13).
    ResourceUnavailable,
    /// Set commit failed (14).
    CommitFailed,
    /// Set undo failed (15).
    UndoFailed,
    /// Request not authorized (16).
    AuthorizationError,
    /// Object is not writable (17).
    NotWritable,
    /// Object name inconsistent (18).
    InconsistentName,
    /// Status code outside the standard range.
    Unknown(u32),
}

impl ErrorStatus {
    /// Maps a raw PDU error-status code to a status.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => Self::Unknown(other),
        }
    }

    /// Returns the SMI name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "noError",
            Self::TooBig => "tooBig",
            Self::NoSuchName => "noSuchName",
            Self::BadValue => "badValue",
            Self::ReadOnly => "readOnly",
            Self::GenErr => "genErr",
            Self::NoAccess => "noAccess",
            Self::WrongType => "wrongType",
            Self::WrongLength => "wrongLength",
            Self::WrongEncoding => "wrongEncoding",
            Self::WrongValue => "wrongValue",
            Self::NoCreation => "noCreation",
            Self::InconsistentValue => "inconsistentValue",
            Self::ResourceUnavailable => "resourceUnavailable",
            Self::CommitFailed => "commitFailed",
            Self::UndoFailed => "undoFailed",
            Self::AuthorizationError => "authorizationError",
            Self::NotWritable => "notWritable",
            Self::InconsistentName => "inconsistentName",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Returns `true` for `noError`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::NoError)
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown error status {code}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Value of a single variable binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    /// Octet string; the printer status blob arrives as one of these.
    OctetString(Vec<u8>),
    /// Any integer-like value (`Integer`, `Counter32`, `Gauge32`, ...).
    Integer(i64),
    /// `NULL`, also used by v1 agents for unset values.
    Null,
    /// Anything else, kept as its debug rendering for diagnostics.
    Other(String),
}

impl SnmpValue {
    /// Returns the bytes if this is an octet string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OctetString(_) => "OCTET STRING",
            Self::Integer(_) => "INTEGER",
            Self::Null => "NULL",
            Self::Other(_) => "other",
        }
    }
}

/// One `(OID, value)` pair of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// Dotted-numeric OID.
    pub oid: String,
    /// The bound value.
    pub value: SnmpValue,
}

impl VarBind {
    /// Creates a new variable binding.
    #[must_use]
    pub fn new(oid: impl Into<String>, value: SnmpValue) -> Self {
        Self {
            oid: oid.into(),
            value,
        }
    }
}

/// A decoded GET response PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    /// Error status reported by the agent.
    pub error_status: ErrorStatus,
    /// 1-based index of the binding the error refers to, 0 if none.
    pub error_index: u32,
    /// Returned bindings, in agent order.
    pub varbinds: Vec<VarBind>,
}

impl GetResponse {
    /// Creates a successful response carrying the given bindings.
    #[must_use]
    pub fn ok(varbinds: Vec<VarBind>) -> Self {
        Self {
            error_status: ErrorStatus::NoError,
            error_index: 0,
            varbinds,
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn error(error_status: ErrorStatus, error_index: u32, varbinds: Vec<VarBind>) -> Self {
        Self {
            error_status,
            error_index,
            varbinds,
        }
    }

    /// Resolves `error_index` to the OID of the offending binding.
    #[must_use]
    pub fn offending_oid(&self) -> Option<&str> {
        let index = usize::try_from(self.error_index).ok()?;
        if index == 0 {
            return None;
        }
        self.varbinds.get(index - 1).map(|vb| vb.oid.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes_round_trip_through_names() {
        assert_eq!(ErrorStatus::from_code(5), ErrorStatus::GenErr);
        assert_eq!(ErrorStatus::from_code(18), ErrorStatus::InconsistentName);
        assert_eq!(ErrorStatus::from_code(42), ErrorStatus::Unknown(42));
        assert_eq!(ErrorStatus::TooBig.to_string(), "tooBig");
        assert_eq!(
            ErrorStatus::Unknown(42).to_string(),
            "unknown error status 42"
        );
    }

    #[test]
    fn offending_oid_resolves_one_based_index() {
        let response = GetResponse::error(
            ErrorStatus::NoSuchName,
            1,
            vec![VarBind::new("1.3.6.1.2.1.1.1.0", SnmpValue::Null)],
        );
        assert_eq!(response.offending_oid(), Some("1.3.6.1.2.1.1.1.0"));
    }

    #[test]
    fn offending_oid_is_none_for_zero_or_out_of_range() {
        let vbs = vec![VarBind::new("1.3.6.1.2.1.1.1.0", SnmpValue::Null)];
        assert_eq!(
            GetResponse::error(ErrorStatus::GenErr, 0, vbs.clone()).offending_oid(),
            None
        );
        assert_eq!(
            GetResponse::error(ErrorStatus::GenErr, 3, vbs).offending_oid(),
            None
        );
    }

    #[test]
    fn octet_string_exposes_bytes() {
        let value = SnmpValue::OctetString(vec![0x80, 0x20, 0x42]);
        assert_eq!(value.as_bytes(), Some(&[0x80, 0x20, 0x42][..]));
        assert_eq!(SnmpValue::Integer(1).as_bytes(), None);
        assert_eq!(SnmpValue::Null.kind(), "NULL");
    }
}
