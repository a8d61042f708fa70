#![doc = include_str!("../README.md")]

use core::{fmt, str::FromStr};

#[cfg(test)]
use log as _;
use serde::{Deserialize, Serialize};
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use test_log as _;
pub use types::{ResourceChecksumType, XsBridgeError};

/// Checksum algorithm, as named by the storage provider
///
/// The canonical name of each variant is its lowercase spelling, which is
/// what ends up in metadata headers and logs.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lower")]
pub enum ChecksumAlgorithm {
    /// Invalid checksum type
    Invalid,

    /// No checksum, the checksum is optional
    #[default]
    Unset,

    /// Adler-32
    Adler32,

    /// MD5
    Md5,

    /// SHA-1
    Sha1,

    /// SHA-256, which the CS3 wire protocol can't express
    Sha256,
}

impl ChecksumAlgorithm {
    /// Every algorithm we know about
    pub const ALL: [Self; 6] = [
        Self::Invalid,
        Self::Unset,
        Self::Adler32,
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
    ];

    /// Returns the canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Unset => "unset",
            Self::Adler32 => "adler32",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Returns the name to show to humans and to clients
    ///
    /// Follows the owncloud client convention: hash functions are upper-cased,
    /// Adler-32 is spelled `Adler32`, everything else is left as is.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Adler32 => "Adler32",
            Self::Invalid | Self::Unset => self.as_str(),
        }
    }

    /// Converts the algorithm to its wire checksum type
    #[must_use]
    pub fn to_wire(self) -> ResourceChecksumType {
        match self {
            Self::Unset => ResourceChecksumType::UNSET,
            Self::Adler32 => ResourceChecksumType::ADLER32,
            Self::Md5 => ResourceChecksumType::MD5,
            Self::Sha1 => ResourceChecksumType::SHA1,
            Self::Invalid | Self::Sha256 => ResourceChecksumType::INVALID,
        }
    }

    /// Converts a wire checksum type to our algorithm
    #[must_use]
    pub fn from_wire(wire: ResourceChecksumType) -> Self {
        match wire {
            ResourceChecksumType::INVALID => Self::Invalid,
            ResourceChecksumType::UNSET => Self::Unset,
            ResourceChecksumType::SHA1 => Self::Sha1,
            ResourceChecksumType::ADLER32 => Self::Adler32,
            ResourceChecksumType::MD5 => Self::Md5,
            _ => Self::Invalid,
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = XsBridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "invalid" => Self::Invalid,
            "unset" => Self::Unset,
            "adler32" => Self::Adler32,
            "md5" => Self::Md5,
            "sha1" => Self::Sha1,
            "sha256" => Self::Sha256,
            _ => return Err(XsBridgeError::UnknownAlgorithm(String::from(s))),
        })
    }
}

impl From<ResourceChecksumType> for ChecksumAlgorithm {
    fn from(wire: ResourceChecksumType) -> Self {
        Self::from_wire(wire)
    }
}

impl From<ChecksumAlgorithm> for ResourceChecksumType {
    fn from(algo: ChecksumAlgorithm) -> Self {
        algo.to_wire()
    }
}

/// Converts a wire checksum type to our checksum algorithm
///
/// Any value not defined by the protocol is converted to
/// [`ChecksumAlgorithm::Invalid`].
#[must_use]
pub fn wire_to_internal(wire: ResourceChecksumType) -> ChecksumAlgorithm {
    ChecksumAlgorithm::from_wire(wire)
}

/// Converts our checksum algorithm to the wire checksum type
///
/// [`ChecksumAlgorithm::Sha256`] has no wire counterpart and is converted to
/// [`ResourceChecksumType::INVALID`].
#[must_use]
pub fn internal_to_wire(algo: ChecksumAlgorithm) -> ResourceChecksumType {
    algo.to_wire()
}

/// Converts a checksum algorithm name to the wire checksum type
///
/// Unknown names are converted to [`ResourceChecksumType::INVALID`].
#[must_use]
pub fn token_to_wire(token: &str) -> ResourceChecksumType {
    match token.parse::<ChecksumAlgorithm>() {
        Ok(algo) => algo.to_wire(),
        Err(_) => ResourceChecksumType::INVALID,
    }
}

/// Returns the display name of a checksum algorithm
#[must_use]
pub const fn display_name(algo: ChecksumAlgorithm) -> &'static str {
    algo.display_name()
}

/// Returns the display name of a checksum algorithm name
///
/// Unknown names are returned unchanged.
#[must_use]
pub fn display_token(token: &str) -> &str {
    match token.parse::<ChecksumAlgorithm>() {
        Ok(algo) => algo.display_name(),
        Err(_) => token,
    }
}

/// One line of the translation table
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MappingEntry {
    /// Our checksum algorithm
    pub algorithm: ChecksumAlgorithm,

    /// Canonical name of the algorithm
    pub name: &'static str,

    /// Display name of the algorithm
    pub display_name: &'static str,

    /// Wire checksum type the algorithm is sent as
    pub wire: ResourceChecksumType,
}

/// Returns the translation of every checksum algorithm we know about
pub fn mapping_table() -> impl Iterator<Item = MappingEntry> {
    ChecksumAlgorithm::ALL.into_iter().map(|algorithm| MappingEntry {
        algorithm,
        name: algorithm.as_str(),
        display_name: algorithm.display_name(),
        wire: algorithm.to_wire(),
    })
}
