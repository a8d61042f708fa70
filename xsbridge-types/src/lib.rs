#![doc = include_str!("../README.md")]

use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
#[cfg(test)]
use serde_json as _;

const PROTO_NAME_PREFIX: &str = "RESOURCE_CHECKSUM_TYPE_";

/// Checksum type as carried in CS3 storage provider messages
///
/// Protobuf enumerations are open: a peer speaking a newer revision of the
/// protocol can send any integer. The raw value is therefore kept as-is, and
/// the values defined by the protocol are exposed as associated constants.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ResourceChecksumType(i32);

impl ResourceChecksumType {
    /// The checksum type is invalid
    pub const INVALID: Self = Self(0);

    /// No checksum was requested
    pub const UNSET: Self = Self(1);

    /// Adler-32
    pub const ADLER32: Self = Self(2);

    /// MD5
    pub const MD5: Self = Self(3);

    /// SHA-1
    pub const SHA1: Self = Self(4);

    /// All the values defined by the protocol, in numerical order
    pub const KNOWN: [Self; 5] = [
        Self::INVALID,
        Self::UNSET,
        Self::ADLER32,
        Self::MD5,
        Self::SHA1,
    ];

    /// Creates a checksum type from its raw wire value
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw wire value
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns true if the value is defined by the protocol
    #[must_use]
    pub fn is_known(self) -> bool {
        self.as_str_name().is_some()
    }

    /// Returns the protobuf name of the value, if it's defined by the protocol
    #[must_use]
    pub fn as_str_name(self) -> Option<&'static str> {
        Some(match self {
            Self::INVALID => "RESOURCE_CHECKSUM_TYPE_INVALID",
            Self::UNSET => "RESOURCE_CHECKSUM_TYPE_UNSET",
            Self::ADLER32 => "RESOURCE_CHECKSUM_TYPE_ADLER32",
            Self::MD5 => "RESOURCE_CHECKSUM_TYPE_MD5",
            Self::SHA1 => "RESOURCE_CHECKSUM_TYPE_SHA1",
            _ => return None,
        })
    }

    /// Creates a checksum type from its protobuf name
    #[must_use]
    pub fn from_str_name(name: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str_name() == Some(name))
    }
}

impl From<i32> for ResourceChecksumType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<ResourceChecksumType> for i32 {
    fn from(value: ResourceChecksumType) -> Self {
        value.0
    }
}

impl fmt::Display for ResourceChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{PROTO_NAME_PREFIX}UNKNOWN({})", self.0),
        }
    }
}

impl FromStr for ResourceChecksumType {
    type Err = XsBridgeError;

    /// Parses a protobuf name (`RESOURCE_CHECKSUM_TYPE_MD5`), a short name
    /// (`MD5`) or a decimal wire value (`3`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = Self::from_str_name(s) {
            return Ok(t);
        }

        if let Some(t) = Self::KNOWN
            .into_iter()
            .find(|t| t.as_str_name().and_then(|n| n.strip_prefix(PROTO_NAME_PREFIX)) == Some(s))
        {
            return Ok(t);
        }

        s.parse::<i32>()
            .map(Self)
            .map_err(|_err| XsBridgeError::UnknownWireType(String::from(s)))
    }
}

/// Our Error Type
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum XsBridgeError {
    /// A string isn't the canonical name of a checksum algorithm
    #[error("Unknown checksum algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A string isn't a name or a value of the wire checksum type
    #[error("Unknown wire checksum type: {0}")]
    UnknownWireType(String),
}
