//! # Identifier Types
//!
//! Fixed-length binary identifiers carried inside SC payloads.
//! The codec only reads and writes their byte form; none of them has
//! behaviour beyond value extraction.

use crate::errors::{MalformedIdentifier, ParseIdentifierError};
use base58::{FromBase58, ToBase58};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a content hash / transaction id.
pub const HASH_LENGTH: usize = 32;
/// Length of an address: 1 version byte + 32-byte digest.
pub const ADDRESS_LENGTH: usize = 1 + HASH_LENGTH;
/// Length of a token colour.
pub const COLOR_LENGTH: usize = 32;
/// Length of a smart contract id: address ‖ colour.
pub const SC_ID_LENGTH: usize = ADDRESS_LENGTH + COLOR_LENGTH;
/// Length of a request id: transaction id ‖ u16 index.
pub const REQUEST_ID_LENGTH: usize = HASH_LENGTH + 2;

/// Copies the leading `N` bytes of `data`.
fn read_fixed<const N: usize>(
    kind: &'static str,
    data: &[u8],
) -> Result<[u8; N], MalformedIdentifier> {
    match data.get(..N) {
        Some(prefix) => {
            let mut bytes = [0u8; N];
            bytes.copy_from_slice(prefix);
            Ok(bytes)
        }
        None => Err(MalformedIdentifier {
            kind,
            expected: N,
            actual: data.len(),
        }),
    }
}

/// Text form of an identifier.
///
/// Hash-like ids (hashes, transaction ids, request ids) are hex. Ledger ids
/// (addresses, colours, contract ids) are base58, as ledger tooling shows them.
#[derive(Debug, Clone, Copy)]
enum TextEncoding {
    Hex,
    Base58,
}

impl TextEncoding {
    fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base58 => "base58",
        }
    }

    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base58 => bytes.to_base58(),
        }
    }

    fn decode(self, s: &str) -> Result<Vec<u8>, String> {
        match self {
            Self::Hex => hex::decode(s).map_err(|err| err.to_string()),
            Self::Base58 => s.from_base58().map_err(|err| format!("{err:?}")),
        }
    }

    fn parse<const N: usize>(
        self,
        kind: &'static str,
        s: &str,
    ) -> Result<[u8; N], ParseIdentifierError> {
        let decoded = self
            .decode(s)
            .map_err(|reason| ParseIdentifierError::InvalidText {
                kind,
                encoding: self.name(),
                reason,
            })?;
        if decoded.len() != N {
            return Err(MalformedIdentifier {
                kind,
                expected: N,
                actual: decoded.len(),
            }
            .into());
        }
        Ok(read_fixed(kind, &decoded)?)
    }
}

/// Implements `Display`, `FromStr` and string serde for a byte newtype.
macro_rules! impl_text_form {
    ($ty:ident, $encoding:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&$encoding.encode(&self.0))
            }
        }

        impl FromStr for $ty {
            type Err = ParseIdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $encoding.parse(stringify!($ty), s).map(Self)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

// =============================================================================
// HASH VALUE (32 bytes)
// =============================================================================

/// A 32-byte content hash (state update hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HashValue(pub [u8; HASH_LENGTH]);

impl HashValue {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; HASH_LENGTH]);

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Returns the bytes by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; HASH_LENGTH] {
        self.0
    }

    /// Reads a hash from the leading 32 bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MalformedIdentifier> {
        read_fixed("HashValue", data).map(Self)
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", hex::encode(self.0))
    }
}

impl_text_form!(HashValue, TextEncoding::Hex);

impl From<[u8; HASH_LENGTH]> for HashValue {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// TRANSACTION ID (32 bytes)
// =============================================================================

/// Identifier of an outer ledger transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TransactionId(pub [u8; HASH_LENGTH]);

impl TransactionId {
    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Returns the bytes by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; HASH_LENGTH] {
        self.0
    }

    /// Reads a transaction id from the leading 32 bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MalformedIdentifier> {
        read_fixed("TransactionId", data).map(Self)
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", hex::encode(self.0))
    }
}

impl_text_form!(TransactionId, TextEncoding::Hex);

impl From<[u8; HASH_LENGTH]> for TransactionId {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// ADDRESS (33 bytes) & COLOR (32 bytes)
// =============================================================================

/// A versioned ledger address: version byte followed by a 32-byte digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// Address version for ED25519 signatures.
    pub const VERSION_ED25519: u8 = 1;
    /// Address version for BLS signatures.
    pub const VERSION_BLS: u8 = 2;

    /// Builds an address from a version byte and a digest.
    #[must_use]
    pub fn new(version: u8, digest: [u8; HASH_LENGTH]) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = version;
        bytes[1..].copy_from_slice(&digest);
        Self(bytes)
    }

    /// Signature scheme version byte.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.0[0]
    }

    /// The 32 bytes after the version byte.
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl_text_form!(Address, TextEncoding::Base58);


/// Token colour of a smart contract's chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color(pub [u8; COLOR_LENGTH]);

impl Color {
    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; COLOR_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", hex::encode(self.0))
    }
}

impl_text_form!(Color, TextEncoding::Base58);

// =============================================================================
// SC ID (65 bytes)
// =============================================================================

/// Identity of a smart contract: the address of its hosting chain and the
/// colour of its token.
///
/// Every SC block on the wire starts with these 65 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScId(pub [u8; SC_ID_LENGTH]);

impl ScId {
    /// All-zero id.
    pub const ZERO: Self = Self([0u8; SC_ID_LENGTH]);

    /// Builds an id from its address and colour parts.
    #[must_use]
    pub fn new(address: &Address, color: &Color) -> Self {
        let mut bytes = [0u8; SC_ID_LENGTH];
        bytes[..ADDRESS_LENGTH].copy_from_slice(address.as_bytes());
        bytes[ADDRESS_LENGTH..].copy_from_slice(color.as_bytes());
        Self(bytes)
    }

    /// Address of the hosting chain.
    #[must_use]
    pub fn address(&self) -> Address {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&self.0[..ADDRESS_LENGTH]);
        Address(bytes)
    }

    /// Colour of the contract's token.
    #[must_use]
    pub fn color(&self) -> Color {
        let mut bytes = [0u8; COLOR_LENGTH];
        bytes.copy_from_slice(&self.0[ADDRESS_LENGTH..]);
        Color(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SC_ID_LENGTH] {
        &self.0
    }

    /// Returns the bytes by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; SC_ID_LENGTH] {
        self.0
    }

    /// Reads an id from the leading 65 bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MalformedIdentifier> {
        read_fixed("ScId", data).map(Self)
    }

    /// Abbreviated `address../color..` form for log lines: the first four
    /// base58 characters of each part.
    #[must_use]
    pub fn short(&self) -> String {
        let address = self.address().to_string();
        let color = self.color().to_string();
        format!(
            "{}../{}..",
            address.get(..4).unwrap_or(&address),
            color.get(..4).unwrap_or(&color)
        )
    }
}

impl fmt::Debug for ScId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScId({})", hex::encode(self.0))
    }
}

impl_text_form!(ScId, TextEncoding::Base58);


impl Default for ScId {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[u8; SC_ID_LENGTH]> for ScId {
    fn from(bytes: [u8; SC_ID_LENGTH]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// REQUEST ID (34 bytes)
// =============================================================================

/// Reference to a request: the outer transaction that carried it and the
/// position of the request block inside that transaction.
///
/// The index is stored big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub [u8; REQUEST_ID_LENGTH]);

impl RequestId {
    /// All-zero request id.
    pub const ZERO: Self = Self([0u8; REQUEST_ID_LENGTH]);

    /// Request at `index` inside `transaction_id`.
    #[must_use]
    pub fn new(transaction_id: &TransactionId, index: u16) -> Self {
        let mut bytes = [0u8; REQUEST_ID_LENGTH];
        bytes[..HASH_LENGTH].copy_from_slice(transaction_id.as_bytes());
        bytes[HASH_LENGTH..].copy_from_slice(&index.to_be_bytes());
        Self(bytes)
    }

    /// The outer transaction this request was carried in.
    #[must_use]
    pub fn transaction_id(&self) -> TransactionId {
        let mut bytes = [0u8; HASH_LENGTH];
        bytes.copy_from_slice(&self.0[..HASH_LENGTH]);
        TransactionId(bytes)
    }

    /// Position of the request block within its outer transaction.
    #[must_use]
    pub fn index(&self) -> u16 {
        u16::from_be_bytes([self.0[HASH_LENGTH], self.0[HASH_LENGTH + 1]])
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; REQUEST_ID_LENGTH] {
        &self.0
    }

    /// Returns the bytes by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; REQUEST_ID_LENGTH] {
        self.0
    }

    /// Reads a request id from the leading 34 bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MalformedIdentifier> {
        read_fixed("RequestId", data).map(Self)
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({self})")
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.transaction_id(), self.index())
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&TextEncoding::Hex.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TextEncoding::Hex
            .parse("RequestId", &s)
            .map(Self)
            .map_err(de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
