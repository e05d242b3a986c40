//! Feed names and on-chain feed identifiers.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{FeedNameError, RpcError};

/// A feed name encoded as a left-aligned, zero-padded `bytes32` string.
///
/// Names longer than 32 bytes are truncated at the last character boundary
/// that fits. NUL and other control characters cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedName {
    name: String,
    encoded: B256,
}

impl FeedName {
    /// Encodes a human-readable feed name (e.g., `"ETH/USD"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains control characters.
    pub fn encode(name: &str) -> Result<Self, FeedNameError> {
        if name.is_empty() {
            return Err(FeedNameError::Empty);
        }
        if let Some((index, ch)) = name.char_indices().find(|(_, c)| c.is_control()) {
            return Err(FeedNameError::Unencodable { ch, index });
        }

        let mut end = name.len().min(32);
        while !name.is_char_boundary(end) {
            end -= 1;
        }

        let mut bytes = [0u8; 32];
        bytes[..end].copy_from_slice(&name.as_bytes()[..end]);

        Ok(Self {
            name: name[..end].to_string(),
            encoded: B256::from(bytes),
        })
    }

    /// Returns the (possibly truncated) name that was encoded.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns the `bytes32` encoding.
    #[must_use]
    pub const fn encoded(&self) -> B256 {
        self.encoded
    }
}

impl std::fmt::Display for FeedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A resolved on-chain data feed identifier.
///
/// Never the all-zero value, which the contract uses to signal an
/// unregistered name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "B256")]
pub struct FeedIdentifier(B256);

impl TryFrom<B256> for FeedIdentifier {
    type Error = RpcError;

    fn try_from(raw: B256) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| RpcError::Decode("all-zero feed identifier".into()))
    }
}

impl FeedIdentifier {
    /// Wraps a raw identifier, returning `None` for the all-zero sentinel.
    #[must_use]
    pub fn new(raw: B256) -> Option<Self> {
        (!raw.is_zero()).then_some(Self(raw))
    }

    /// Returns the raw 32-byte identifier.
    #[must_use]
    pub const fn as_b256(&self) -> B256 {
        self.0
    }
}

impl std::fmt::Display for FeedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
